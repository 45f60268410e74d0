//! End-to-end lifecycle chains against the in-memory fakes.

use std::io::{Cursor, Read, Write};
use std::path::Path;

use lexops_service::{BotStatus, JobStatus, LocaleStatus, ServiceError};
use lexops_testing::{
    DEFAULT_ROLE_ARN, FakeLex, FakeRoles, FakeServices, FakeStacks, FakeTransfer, LexCall,
};
use lexops_workflow::{
    BotCoordinates, BotVersion, ImportRequest, LexOps, LookupPolicy, WaitKind, WaitPolicy,
    WaiterConfig, WorkflowConfig, WorkflowError,
};

const DOWNLOAD_URL: &str = "https://exports.example.com/dev-Support.zip?X-Amz-Signature=abc";

fn config(root: &Path) -> WorkflowConfig {
    WorkflowConfig {
        root_dir: root.to_path_buf(),
        lookup: LookupPolicy {
            max_attempts: 3,
            retry_delay_ms: 0,
        },
        waiters: WaiterConfig::uniform(WaitPolicy {
            delay_secs: 0,
            max_attempts: 5,
        }),
        ..WorkflowConfig::default()
    }
}

fn ops(fakes: &FakeServices, root: &Path) -> LexOps {
    LexOps::new(fakes.services(), config(root))
}

fn dev(bot: &str) -> BotCoordinates {
    BotCoordinates::new(bot, "dev", None).unwrap()
}

fn versions(range: std::ops::RangeInclusive<u32>) -> Vec<String> {
    range.map(|v| v.to_string()).collect()
}

fn seed_definition(root: &Path) {
    let bot = root.join("Support");
    std::fs::create_dir_all(bot.join("BotLocales/en_GB")).unwrap();
    std::fs::write(root.join("Manifest.json"), r#"{"metadata":{"fileFormat":"LexJson"}}"#)
        .unwrap();
    std::fs::write(
        bot.join("Bot.json"),
        "{\n    \"dataPrivacy\": {\n        \"childDirected\": false\n    },\n    \"name\": \"Support\"\n}",
    )
    .unwrap();
    std::fs::write(
        bot.join("BotLocales/en_GB/BotLocale.json"),
        r#"{"identifier":"en_GB"}"#,
    )
    .unwrap();
}

fn export_archive(deployed: &str) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let opts = zip::write::SimpleFileOptions::default();
    writer.start_file(format!("{deployed}/Bot.json"), opts).unwrap();
    writer
        .write_all(format!(r#"{{"name":"{deployed}","version":"1.0"}}"#).as_bytes())
        .unwrap();
    writer
        .start_file(format!("{deployed}/BotLocales/en_GB/BotLocale.json"), opts)
        .unwrap();
    writer.write_all(br#"{"identifier":"en_GB"}"#).unwrap();
    writer.start_file("Manifest.json", opts).unwrap();
    writer.write_all(br#"{"metadata":{}}"#).unwrap();
    writer.finish().unwrap().into_inner()
}

fn deployed_support(latest: &str, listed: &[String]) -> FakeLex {
    let listed: Vec<&str> = listed.iter().map(String::as_str).collect();
    FakeLex::new()
        .with_bot("BOT1", "dev-Support", Some(latest))
        .with_versions("BOT1", &listed)
        .with_alias("BOT1", "ALIAS1", "dev-live")
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

#[tokio::test]
async fn import_runs_the_full_chain_in_order() {
    let dir = tempfile::tempdir().unwrap();
    seed_definition(dir.path());
    let mut listed = vec!["DRAFT".to_string()];
    listed.extend(versions(1..=3));
    let fakes = FakeServices::new()
        .with_lex(
            deployed_support("3", &listed)
                .with_import_statuses([JobStatus::InProgress, JobStatus::Completed])
                .with_locale_statuses([LocaleStatus::Building, LocaleStatus::Built]),
        )
        .with_stacks(FakeStacks::new().with_output("dev-live", "BotVersion", "2"));

    let request = ImportRequest::new(dev("Support")).with_alias("live");
    let report = ops(&fakes, dir.path()).import(&request).await.unwrap();

    assert_eq!(report.bot_id, "BOT1");
    assert_eq!(report.new_version, 4);
    assert!(report.alias_repointed);
    assert_eq!(report.evicted_version, None);

    assert_eq!(
        fakes.lex.operations(),
        vec![
            "ListBots",
            "ListBotAliases",
            "CreateUploadUrl",
            "DescribeBot",
            "StartImport",
            "DescribeImport",
            "DescribeImport",
            "DescribeImport",
            "DeleteImport",
            "BuildBotLocale",
            "DescribeBotLocale",
            "DescribeBotLocale",
            "ListBotVersions",
            "CreateBotVersion",
            "DescribeBotVersion",
            "UpdateBotAlias",
        ]
    );
    // Far below the ceiling the alias stack is never read.
    assert!(fakes.stacks.lookups().is_empty());

    let calls = fakes.lex.calls();
    assert!(calls.contains(&LexCall::BuildBotLocale {
        bot_id: "BOT1".into(),
        version: "DRAFT".into(),
        locale_id: "en_GB".into(),
    }));
    assert!(calls.contains(&LexCall::CreateBotVersion {
        bot_id: "BOT1".into(),
        source_version: "DRAFT".into(),
        locale_id: "en_GB".into(),
    }));
    assert!(calls.contains(&LexCall::RepointAlias {
        bot_id: "BOT1".into(),
        alias_id: "ALIAS1".into(),
        version: "4".into(),
        locale_id: "en_GB".into(),
    }));
    let spec = calls
        .iter()
        .find_map(|c| match c {
            LexCall::StartImport { spec, .. } => Some(spec.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(spec.bot_name, "dev-Support");
    assert_eq!(spec.role_arn, DEFAULT_ROLE_ARN);
    assert_eq!(spec.idle_session_ttl_secs, 300);
}

#[tokio::test]
async fn import_uploads_archive_under_deployed_name() {
    let dir = tempfile::tempdir().unwrap();
    seed_definition(dir.path());
    let fakes = FakeServices::new().with_lex(deployed_support("1", &versions(1..=1)));

    ops(&fakes, dir.path())
        .import(&ImportRequest::new(dev("Support")))
        .await
        .unwrap();

    let uploads = fakes.transfer.uploads();
    assert_eq!(uploads.len(), 1);
    assert!(uploads[0].0.starts_with("https://uploads.example.com/"));

    let mut zip = zip::ZipArchive::new(Cursor::new(uploads[0].1.clone())).unwrap();
    let mut bot = String::new();
    zip.by_name("dev-Support/Bot.json")
        .unwrap()
        .read_to_string(&mut bot)
        .unwrap();
    assert_eq!(
        bot,
        r#"{"dataPrivacy":{"childDirected":false},"name":"dev-Support"}"#
    );
    assert!(zip.by_name("dev-Support/BotLocales/en_GB/BotLocale.json").is_ok());
    assert!(zip.by_name("Manifest.json").is_ok());

    // The committed definition keeps its short name.
    let local = std::fs::read_to_string(dir.path().join("Support/Bot.json")).unwrap();
    assert!(local.contains("\"name\": \"Support\""));
}

#[tokio::test]
async fn import_evicts_oldest_unprotected_version_at_ceiling() {
    let dir = tempfile::tempdir().unwrap();
    seed_definition(dir.path());
    let fakes = FakeServices::new()
        .with_lex(deployed_support("26", &versions(1..=26)))
        .with_stacks(FakeStacks::new().with_output("dev-live", "BotVersion", "1"));

    let report = ops(&fakes, dir.path())
        .import(&ImportRequest::new(dev("Support")).with_alias("live"))
        .await
        .unwrap();

    assert_eq!(report.evicted_version, Some(2));
    assert_eq!(report.new_version, 27);
    let remaining = fakes.lex.versions("BOT1");
    assert!(remaining.contains(&"1".to_string()));
    assert!(!remaining.contains(&"2".to_string()));
    assert!(fakes.lex.calls().contains(&LexCall::DeleteBotVersion {
        bot_id: "BOT1".into(),
        version: "2".into(),
        skip_check: false,
    }));

    let ops_seen = fakes.lex.operations();
    let delete_at = ops_seen.iter().position(|o| *o == "DeleteBotVersion").unwrap();
    let create_at = ops_seen.iter().position(|o| *o == "CreateBotVersion").unwrap();
    assert!(delete_at < create_at);
}

#[tokio::test]
async fn first_import_with_alias_needs_no_alias_stack() {
    let dir = tempfile::tempdir().unwrap();
    seed_definition(dir.path());
    let fakes = FakeServices::new().with_lex(deployed_support("3", &versions(1..=3)));

    let report = ops(&fakes, dir.path())
        .import(&ImportRequest::new(dev("Support")).with_alias("live"))
        .await
        .unwrap();

    assert_eq!(report.new_version, 4);
    assert_eq!(report.evicted_version, None);
    assert!(report.alias_repointed);
    assert!(fakes.stacks.lookups().is_empty());
    assert!(fakes.lex.operations().contains(&"CreateBotVersion"));
}

#[tokio::test]
async fn import_at_ceiling_without_alias_stack_evicts_oldest() {
    let dir = tempfile::tempdir().unwrap();
    seed_definition(dir.path());
    let fakes = FakeServices::new().with_lex(deployed_support("25", &versions(1..=25)));

    let report = ops(&fakes, dir.path())
        .import(&ImportRequest::new(dev("Support")).with_alias("live"))
        .await
        .unwrap();

    assert_eq!(fakes.stacks.lookups(), vec!["dev-live"]);
    assert_eq!(report.evicted_version, Some(1));
    assert_eq!(report.new_version, 26);
    assert!(report.alias_repointed);
}

#[tokio::test]
async fn ticket_deployments_skip_the_stack_lookup() {
    let dir = tempfile::tempdir().unwrap();
    seed_definition(dir.path());
    let fakes = FakeServices::new().with_lex(
        FakeLex::new()
            .with_bot("BOT9", "T-42-dev-Support", Some("25"))
            .with_versions("BOT9", &versions(1..=25).iter().map(String::as_str).collect::<Vec<_>>())
            .with_alias("BOT9", "ALIAS9", "dev-live"),
    );
    let coords = BotCoordinates::new("Support", "dev", Some("T-42".into())).unwrap();

    let report = ops(&fakes, dir.path())
        .import(&ImportRequest::new(coords).with_alias("live"))
        .await
        .unwrap();

    assert_eq!(report.evicted_version, Some(1));
    assert!(fakes.stacks.lookups().is_empty());
    assert!(!fakes.transfer.uploads()[0].1.is_empty());
}

#[tokio::test]
async fn eviction_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    seed_definition(dir.path());
    let fakes = FakeServices::new().with_lex(deployed_support("30", &versions(1..=30)));

    let report = ops(&fakes, dir.path())
        .import(
            &ImportRequest::new(dev("Support"))
                .with_alias("live")
                .with_eviction(false),
        )
        .await
        .unwrap();

    assert_eq!(report.evicted_version, None);
    assert!(!fakes.lex.operations().contains(&"ListBotVersions"));
    assert!(fakes.stacks.lookups().is_empty());
}

#[tokio::test]
async fn missing_alias_leaves_new_version_unassociated() {
    let dir = tempfile::tempdir().unwrap();
    seed_definition(dir.path());
    let fakes = FakeServices::new()
        .with_lex(
            FakeLex::new()
                .with_bot("BOT1", "dev-Support", Some("1"))
                .with_versions("BOT1", &["1"])
                .with_alias("BOT1", "ALIAS2", "dev-canary"),
        )
        .with_stacks(FakeStacks::new().with_stack("dev-live"));

    let report = ops(&fakes, dir.path())
        .import(&ImportRequest::new(dev("Support")).with_alias("live"))
        .await
        .unwrap();

    assert_eq!(report.new_version, 2);
    assert!(!report.alias_repointed);
    assert!(!fakes.lex.operations().contains(&"UpdateBotAlias"));
}

#[tokio::test]
async fn alias_on_a_later_page_is_found() {
    let dir = tempfile::tempdir().unwrap();
    seed_definition(dir.path());
    let fakes = FakeServices::new().with_lex(
        FakeLex::new()
            .with_bot("BOT1", "dev-Support", Some("2"))
            .with_versions("BOT1", &["1", "2"])
            .with_alias("BOT1", "ALIAS2", "dev-canary")
            .with_alias("BOT1", "ALIAS3", "dev-beta")
            .with_alias("BOT1", "ALIAS1", "dev-live")
            .with_page_size(1),
    );

    let report = ops(&fakes, dir.path())
        .import(
            &ImportRequest::new(dev("Support"))
                .with_alias("live")
                .with_eviction(false),
        )
        .await
        .unwrap();

    assert!(report.alias_repointed);
    assert_eq!(report.new_version, 3);
}

#[tokio::test]
async fn failed_import_stops_before_the_build() {
    let dir = tempfile::tempdir().unwrap();
    seed_definition(dir.path());
    let fakes = FakeServices::new().with_lex(
        deployed_support("1", &versions(1..=1))
            .with_import_statuses([JobStatus::InProgress, JobStatus::Failed]),
    );

    let err = ops(&fakes, dir.path())
        .import(&ImportRequest::new(dev("Support")))
        .await
        .unwrap_err();

    match err {
        WorkflowError::WaitFailed {
            kind,
            state,
            reasons,
            ..
        } => {
            assert_eq!(kind, WaitKind::ImportCompleted);
            assert_eq!(state, "Failed");
            assert_eq!(reasons, vec!["invalid bot definition"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!fakes.lex.operations().contains(&"BuildBotLocale"));
}

#[tokio::test]
async fn failed_locale_build_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    seed_definition(dir.path());
    let fakes = FakeServices::new().with_lex(
        deployed_support("1", &versions(1..=1)).with_locale_statuses([LocaleStatus::NotBuilt]),
    );

    let err = ops(&fakes, dir.path())
        .import(&ImportRequest::new(dev("Support")))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::WaitFailed {
            kind: WaitKind::LocaleBuilt,
            ..
        }
    ));
    assert!(!fakes.lex.operations().contains(&"CreateBotVersion"));
}

#[tokio::test]
async fn rejected_upload_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    seed_definition(dir.path());
    let fakes = FakeServices::new()
        .with_lex(deployed_support("1", &versions(1..=1)))
        .with_transfer(FakeTransfer::new().with_upload_status(403));

    let err = ops(&fakes, dir.path())
        .import(&ImportRequest::new(dev("Support")))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Service(ServiceError::TransferStatus { status: 403, .. })
    ));
    assert!(!fakes.lex.operations().contains(&"StartImport"));
}

#[tokio::test]
async fn import_without_local_definition_fails_before_upload() {
    let dir = tempfile::tempdir().unwrap();
    let fakes = FakeServices::new().with_lex(deployed_support("1", &versions(1..=1)));

    let err = ops(&fakes, dir.path())
        .import(&ImportRequest::new(dev("Support")))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Bundle(_)));
    assert!(!fakes.lex.operations().contains(&"CreateUploadUrl"));
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_bot_is_not_found_after_retries() {
    let dir = tempfile::tempdir().unwrap();
    let fakes = FakeServices::new();

    let err = ops(&fakes, dir.path())
        .delete(&dev("Ghost"))
        .await
        .unwrap_err();
    match err {
        WorkflowError::BotNotFound { name, attempts } => {
            assert_eq!(name, "dev-Ghost");
            assert_eq!(attempts, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(fakes.lex.operations(), vec!["ListBots"; 3]);
}

#[tokio::test]
async fn bot_listed_late_is_still_resolved() {
    let dir = tempfile::tempdir().unwrap();
    let fakes = FakeServices::new().with_lex(
        FakeLex::new()
            .with_bot("BOT1", "dev-Support", None)
            .with_empty_pages("ListBots", 2),
    );

    let bot = ops(&fakes, dir.path()).resolve(&dev("Support")).await.unwrap();
    assert_eq!(bot.bot_id, "BOT1");
    assert_eq!(bot.latest_version, BotVersion::Draft);
    assert_eq!(fakes.lex.operations().len(), 3);
}

// ---------------------------------------------------------------------------
// Versions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn version_waiter_tolerates_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let fakes = FakeServices::new().with_lex(
        FakeLex::new()
            .with_bot("BOT1", "dev-Support", Some("1"))
            .with_versions("BOT1", &["1"])
            .with_version_statuses([None, Some(BotStatus::Versioning)]),
    );

    let version = ops(&fakes, dir.path())
        .create_version("BOT1", BotVersion::Draft)
        .await
        .unwrap();
    assert_eq!(version, 2);
    let describes = fakes
        .lex
        .operations()
        .into_iter()
        .filter(|o| *o == "DescribeBotVersion")
        .count();
    assert_eq!(describes, 3);
}

#[tokio::test]
async fn version_waiter_times_out() {
    let dir = tempfile::tempdir().unwrap();
    let fakes = FakeServices::new().with_lex(
        FakeLex::new()
            .with_bot("BOT1", "dev-Support", None)
            .with_version_statuses(std::iter::repeat_n(Some(BotStatus::Versioning), 10)),
    );

    let err = ops(&fakes, dir.path())
        .create_version("BOT1", BotVersion::Draft)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::WaitTimedOut {
            kind: WaitKind::VersionAvailable,
            attempts: 5,
            ..
        }
    ));
}

#[tokio::test]
async fn prune_evicts_exactly_one_version() {
    let dir = tempfile::tempdir().unwrap();
    let fakes = FakeServices::new()
        .with_lex(deployed_support("40", &versions(1..=40)))
        .with_stacks(FakeStacks::new().with_stack("dev-live"));

    let evicted = ops(&fakes, dir.path())
        .prune(&dev("Support"), "live")
        .await
        .unwrap();
    assert_eq!(evicted, Some(1));
    assert_eq!(fakes.lex.versions("BOT1").len(), 39);
}

#[tokio::test]
async fn prune_below_ceiling_ignores_missing_alias_stack() {
    let dir = tempfile::tempdir().unwrap();
    let fakes = FakeServices::new().with_lex(deployed_support("5", &versions(1..=5)));

    let evicted = ops(&fakes, dir.path())
        .prune(&dev("Support"), "live")
        .await
        .unwrap();
    assert_eq!(evicted, None);
    assert!(fakes.stacks.lookups().is_empty());
}

#[tokio::test]
async fn prune_below_ceiling_deletes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let fakes = FakeServices::new()
        .with_lex(deployed_support("10", &versions(1..=10)))
        .with_stacks(FakeStacks::new().with_output("dev-live", "BotVersion", "10"));

    let evicted = ops(&fakes, dir.path())
        .prune(&dev("Support"), "live")
        .await
        .unwrap();
    assert_eq!(evicted, None);
    assert!(!fakes.lex.operations().contains(&"DeleteBotVersion"));
}

#[tokio::test]
async fn prune_fails_when_alias_stack_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let fakes = FakeServices::new().with_lex(deployed_support("30", &versions(1..=30)));

    let err = ops(&fakes, dir.path())
        .prune(&dev("Support"), "live")
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Service(ref e) if e.is_not_found()), "{err}");
    assert_eq!(fakes.lex.versions("BOT1").len(), 30);
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[tokio::test]
async fn export_installs_definition_under_short_name() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("lex_bots");
    let fakes = FakeServices::new()
        .with_lex(
            FakeLex::new()
                .with_bot("BOT1", "dev-Support", Some("2"))
                .with_download_url(DOWNLOAD_URL)
                .with_export_statuses([JobStatus::InProgress, JobStatus::Completed]),
        )
        .with_transfer(FakeTransfer::new().with_download(DOWNLOAD_URL, export_archive("dev-Support")));

    let report = ops(&fakes, &root)
        .export(&dev("Support"), BotVersion::Draft)
        .await
        .unwrap();

    assert_eq!(report.bot_id, "BOT1");
    assert_eq!(report.bot_dir, root.join("Support"));
    assert_eq!(report.files, 2);
    assert!(!root.join("dev-Support").exists());
    assert!(root.join("Manifest.json").is_file());
    assert_eq!(
        std::fs::read_to_string(root.join("Support/Bot.json")).unwrap(),
        "{\n    \"name\": \"Support\",\n    \"version\": \"1.0\"\n}"
    );

    let calls = fakes.lex.calls();
    assert_eq!(
        calls[1],
        LexCall::CreateExport {
            bot_id: "BOT1".into(),
            version: "DRAFT".into(),
        }
    );
    assert_eq!(
        calls.last(),
        Some(&LexCall::DeleteExport {
            export_id: report.export_id.clone(),
        })
    );
}

#[tokio::test]
async fn export_without_download_url_fails() {
    let dir = tempfile::tempdir().unwrap();
    let fakes = FakeServices::new().with_lex(FakeLex::new().with_bot("BOT1", "dev-Support", None));

    let err = ops(&fakes, dir.path())
        .export(&dev("Support"), BotVersion::Numbered(3))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::MissingDownloadUrl { .. }));
    assert!(!fakes.lex.operations().contains(&"DeleteExport"));
}

#[tokio::test]
async fn failed_download_leaves_workspace_alone() {
    let dir = tempfile::tempdir().unwrap();
    seed_definition(dir.path());
    let fakes = FakeServices::new().with_lex(
        FakeLex::new()
            .with_bot("BOT1", "dev-Support", None)
            .with_download_url(DOWNLOAD_URL),
    );

    let err = ops(&fakes, dir.path())
        .export(&dev("Support"), BotVersion::Draft)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Service(ServiceError::TransferStatus { status: 404, .. })
    ));
    assert!(dir.path().join("Support/Bot.json").is_file());
}

// ---------------------------------------------------------------------------
// Create / delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_waits_for_bot_then_adds_alias() {
    let dir = tempfile::tempdir().unwrap();
    let arn = "arn:aws:iam::123456789012:role/dev-LexRole";
    let fakes = FakeServices::new()
        .with_lex(FakeLex::new().with_bot_statuses([BotStatus::Creating, BotStatus::Available]))
        .with_roles(FakeRoles::new().with_role("dev-LexRole", arn));
    let coords = BotCoordinates::new("Support", "dev", Some("T-7".into())).unwrap();

    let report = ops(&fakes, dir.path())
        .create(&coords, "dev-LexRole", Some("live"))
        .await
        .unwrap();

    assert_eq!(report.deployed_name, "T-7-dev-Support");
    assert!(report.alias_id.is_some());
    assert_eq!(
        fakes.lex.operations(),
        vec!["CreateBot", "DescribeBot", "DescribeBot", "CreateBotAlias"]
    );
    let calls = fakes.lex.calls();
    match &calls[0] {
        LexCall::CreateBot(bot) => {
            assert_eq!(bot.name, "T-7-dev-Support");
            assert_eq!(bot.description, "T-7-dev-Support");
            assert_eq!(bot.role_arn, arn);
            assert!(!bot.child_directed);
            assert_eq!(bot.idle_session_ttl_secs, 300);
        }
        other => panic!("unexpected call: {other:?}"),
    }
    assert_eq!(
        calls[3],
        LexCall::CreateBotAlias {
            bot_id: report.bot_id.clone(),
            alias_name: "dev-live".into(),
            description: "T-7-dev-Support".into(),
        }
    );
}

#[tokio::test]
async fn create_with_unknown_role_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let fakes = FakeServices::new();

    let err = ops(&fakes, dir.path())
        .create(&dev("Support"), "missing-role", None)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Service(ref e) if e.is_not_found()));
    assert!(fakes.lex.calls().is_empty());
}

#[tokio::test]
async fn delete_skips_the_in_use_check() {
    let dir = tempfile::tempdir().unwrap();
    let fakes = FakeServices::new().with_lex(FakeLex::new().with_bot("BOT1", "dev-Support", None));

    let bot_id = ops(&fakes, dir.path()).delete(&dev("Support")).await.unwrap();
    assert_eq!(bot_id, "BOT1");
    assert!(!fakes.lex.has_bot("BOT1"));
    assert_eq!(
        fakes.lex.calls().last(),
        Some(&LexCall::DeleteBot {
            bot_id: "BOT1".into(),
            skip_check: true,
        })
    );
}
