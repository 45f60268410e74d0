//! Lex V2 model-building implementation of [`LexModels`].

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_lexmodelsv2::Client;
use aws_sdk_lexmodelsv2::operation::describe_bot_alias::DescribeBotAliasOutput;
use aws_sdk_lexmodelsv2::types::{
    BotAliasLocaleSettings, BotExportSpecification, BotFilter, BotFilterName, BotFilterOperator,
    BotImportSpecification, BotSortAttribute, BotSortBy, BotType, BotVersionLocaleDetails,
    BotVersionSortAttribute, BotVersionSortBy, ConversationLogSettings, DataPrivacy,
    ExportResourceSpecification, ImportExportFileFormat, ImportResourceSpecification,
    MergeStrategy, SentimentAnalysisSettings, SortOrder,
};
use tracing::debug;

use crate::error::{Result, ServiceError};
use crate::traits::LexModels;
use crate::types::{
    BotAliasSummary, BotDescription, BotStatus, BotSummary, BotVersionSummary,
    ExportDescription, ImportDescription, ImportSpec, JobStatus, LocaleDescription,
    LocaleStatus, NewBot, Page, UploadTarget,
};

/// [`LexModels`] backed by `aws-sdk-lexmodelsv2`.
#[derive(Debug, Clone)]
pub struct AwsLexModels {
    client: Client,
}

impl AwsLexModels {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }

    /// Wrap an already configured client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

/// Turn an optional response field into an owned string or a typed error.
fn required(value: Option<&str>, operation: &'static str, field: &'static str) -> Result<String> {
    value
        .map(str::to_string)
        .ok_or(ServiceError::MissingField { operation, field })
}

fn data_privacy(child_directed: bool) -> DataPrivacy {
    DataPrivacy::builder().child_directed(child_directed).build()
}

/// Settings sent with `UpdateBotAlias` when an alias is re-pointed.
///
/// Everything but the version is carried over from the current alias.  An
/// alias without locale settings gets `locale_id` enabled; one without
/// sentiment settings gets sentiment detection switched off.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AliasUpdate {
    pub alias_name: String,
    pub description: Option<String>,
    pub locale_settings: HashMap<String, BotAliasLocaleSettings>,
    pub conversation_logs: Option<ConversationLogSettings>,
    pub sentiment: SentimentAnalysisSettings,
}

impl AliasUpdate {
    pub(crate) fn from_alias(alias: &DescribeBotAliasOutput, locale_id: &str) -> Result<Self> {
        let locale_settings = match alias.bot_alias_locale_settings() {
            Some(settings) if !settings.is_empty() => settings.clone(),
            _ => HashMap::from([(
                locale_id.to_string(),
                BotAliasLocaleSettings::builder().enabled(true).build(),
            )]),
        };
        let sentiment = alias.sentiment_analysis_settings().cloned().unwrap_or_else(|| {
            SentimentAnalysisSettings::builder()
                .detect_sentiment(false)
                .build()
        });

        Ok(Self {
            alias_name: required(alias.bot_alias_name(), "DescribeBotAlias", "botAliasName")?,
            description: alias.description().map(str::to_string),
            locale_settings,
            conversation_logs: alias.conversation_log_settings().cloned(),
            sentiment,
        })
    }
}

#[async_trait]
impl LexModels for AwsLexModels {
    async fn list_bots(&self, name: &str, next_token: Option<String>) -> Result<Page<BotSummary>> {
        const OP: &str = "ListBots";
        let sort = BotSortBy::builder()
            .attribute(BotSortAttribute::BotName)
            .order(SortOrder::Ascending)
            .build()
            .map_err(|e| ServiceError::invalid_request(OP, e))?;
        let filter = BotFilter::builder()
            .name(BotFilterName::BotName)
            .values(name)
            .operator(BotFilterOperator::Equals)
            .build()
            .map_err(|e| ServiceError::invalid_request(OP, e))?;

        let out = self
            .client
            .list_bots()
            .sort_by(sort)
            .filters(filter)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| ServiceError::from_sdk(OP, e))?;

        let items = out
            .bot_summaries()
            .iter()
            .filter_map(|s| {
                Some(BotSummary {
                    bot_id: s.bot_id()?.to_string(),
                    bot_name: s.bot_name().unwrap_or_default().to_string(),
                    latest_version: s.latest_bot_version().map(str::to_string),
                })
            })
            .collect();

        Ok(Page {
            items,
            next_token: out.next_token().map(str::to_string),
        })
    }

    async fn list_bot_versions(
        &self,
        bot_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<BotVersionSummary>> {
        const OP: &str = "ListBotVersions";
        let sort = BotVersionSortBy::builder()
            .attribute(BotVersionSortAttribute::BotVersion)
            .order(SortOrder::Ascending)
            .build()
            .map_err(|e| ServiceError::invalid_request(OP, e))?;

        let out = self
            .client
            .list_bot_versions()
            .bot_id(bot_id)
            .sort_by(sort)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| ServiceError::from_sdk(OP, e))?;

        let items = out
            .bot_version_summaries()
            .iter()
            .filter_map(|s| {
                Some(BotVersionSummary {
                    version: s.bot_version()?.to_string(),
                })
            })
            .collect();

        Ok(Page {
            items,
            next_token: out.next_token().map(str::to_string),
        })
    }

    async fn list_bot_aliases(
        &self,
        bot_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<BotAliasSummary>> {
        let out = self
            .client
            .list_bot_aliases()
            .bot_id(bot_id)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| ServiceError::from_sdk("ListBotAliases", e))?;

        let items = out
            .bot_alias_summaries()
            .iter()
            .filter_map(|s| {
                Some(BotAliasSummary {
                    alias_id: s.bot_alias_id()?.to_string(),
                    alias_name: s.bot_alias_name()?.to_string(),
                })
            })
            .collect();

        Ok(Page {
            items,
            next_token: out.next_token().map(str::to_string),
        })
    }

    async fn describe_bot(&self, bot_id: &str) -> Result<BotDescription> {
        const OP: &str = "DescribeBot";
        let out = self
            .client
            .describe_bot()
            .bot_id(bot_id)
            .send()
            .await
            .map_err(|e| ServiceError::from_sdk(OP, e))?;

        Ok(BotDescription {
            bot_id: out.bot_id().unwrap_or(bot_id).to_string(),
            bot_name: required(out.bot_name(), OP, "botName")?,
            role_arn: required(out.role_arn(), OP, "roleArn")?,
            child_directed: out
                .data_privacy()
                .map(|p| p.child_directed())
                .unwrap_or(false),
            idle_session_ttl_secs: out
                .idle_session_ttl_in_seconds()
                .ok_or(ServiceError::MissingField {
                    operation: OP,
                    field: "idleSessionTTLInSeconds",
                })?,
            status: out
                .bot_status()
                .map(|s| BotStatus::from_wire(s.as_str()))
                .unwrap_or_else(|| BotStatus::Other("Unknown".into())),
        })
    }

    async fn create_bot(&self, bot: &NewBot) -> Result<String> {
        const OP: &str = "CreateBot";
        let out = self
            .client
            .create_bot()
            .bot_name(&bot.name)
            .description(&bot.description)
            .role_arn(&bot.role_arn)
            .data_privacy(data_privacy(bot.child_directed))
            .idle_session_ttl_in_seconds(bot.idle_session_ttl_secs)
            .bot_type(BotType::Bot)
            .send()
            .await
            .map_err(|e| ServiceError::from_sdk(OP, e))?;

        required(out.bot_id(), OP, "botId")
    }

    async fn delete_bot(&self, bot_id: &str, skip_resource_in_use_check: bool) -> Result<()> {
        self.client
            .delete_bot()
            .bot_id(bot_id)
            .skip_resource_in_use_check(skip_resource_in_use_check)
            .send()
            .await
            .map_err(|e| ServiceError::from_sdk("DeleteBot", e))?;
        Ok(())
    }

    async fn create_bot_alias(
        &self,
        bot_id: &str,
        alias_name: &str,
        description: &str,
    ) -> Result<String> {
        const OP: &str = "CreateBotAlias";
        let out = self
            .client
            .create_bot_alias()
            .bot_id(bot_id)
            .bot_alias_name(alias_name)
            .description(description)
            .send()
            .await
            .map_err(|e| ServiceError::from_sdk(OP, e))?;

        required(out.bot_alias_id(), OP, "botAliasId")
    }

    async fn repoint_alias(
        &self,
        bot_id: &str,
        alias_id: &str,
        version: &str,
        locale_id: &str,
    ) -> Result<()> {
        const OP: &str = "UpdateBotAlias";
        let alias = self
            .client
            .describe_bot_alias()
            .bot_id(bot_id)
            .bot_alias_id(alias_id)
            .send()
            .await
            .map_err(|e| ServiceError::from_sdk("DescribeBotAlias", e))?;

        let update = AliasUpdate::from_alias(&alias, locale_id)?;

        debug!(bot_id, alias_id, version, "updating bot alias");
        self.client
            .update_bot_alias()
            .bot_id(bot_id)
            .bot_alias_id(alias_id)
            .bot_alias_name(update.alias_name)
            .set_description(update.description)
            .bot_version(version)
            .set_bot_alias_locale_settings(Some(update.locale_settings))
            .set_conversation_log_settings(update.conversation_logs)
            .sentiment_analysis_settings(update.sentiment)
            .send()
            .await
            .map_err(|e| ServiceError::from_sdk(OP, e))?;
        Ok(())
    }

    async fn create_export(&self, bot_id: &str, version: &str) -> Result<String> {
        const OP: &str = "CreateExport";
        let bot_spec = BotExportSpecification::builder()
            .bot_id(bot_id)
            .bot_version(version)
            .build()
            .map_err(|e| ServiceError::invalid_request(OP, e))?;

        let out = self
            .client
            .create_export()
            .resource_specification(
                ExportResourceSpecification::builder()
                    .bot_export_specification(bot_spec)
                    .build(),
            )
            .file_format(ImportExportFileFormat::LexJson)
            .send()
            .await
            .map_err(|e| ServiceError::from_sdk(OP, e))?;

        required(out.export_id(), OP, "exportId")
    }

    async fn describe_export(&self, export_id: &str) -> Result<ExportDescription> {
        const OP: &str = "DescribeExport";
        let out = self
            .client
            .describe_export()
            .export_id(export_id)
            .send()
            .await
            .map_err(|e| ServiceError::from_sdk(OP, e))?;

        Ok(ExportDescription {
            export_id: export_id.to_string(),
            status: out
                .export_status()
                .map(|s| JobStatus::from_wire(s.as_str()))
                .ok_or(ServiceError::MissingField {
                    operation: OP,
                    field: "exportStatus",
                })?,
            download_url: out.download_url().map(str::to_string),
            failure_reasons: out.failure_reasons().to_vec(),
        })
    }

    async fn delete_export(&self, export_id: &str) -> Result<()> {
        self.client
            .delete_export()
            .export_id(export_id)
            .send()
            .await
            .map_err(|e| ServiceError::from_sdk("DeleteExport", e))?;
        Ok(())
    }

    async fn create_upload_url(&self) -> Result<UploadTarget> {
        const OP: &str = "CreateUploadUrl";
        let out = self
            .client
            .create_upload_url()
            .send()
            .await
            .map_err(|e| ServiceError::from_sdk(OP, e))?;

        Ok(UploadTarget {
            import_id: required(out.import_id(), OP, "importId")?,
            upload_url: required(out.upload_url(), OP, "uploadUrl")?,
        })
    }

    async fn start_import(&self, import_id: &str, spec: &ImportSpec) -> Result<String> {
        const OP: &str = "StartImport";
        let bot_spec = BotImportSpecification::builder()
            .bot_name(&spec.bot_name)
            .role_arn(&spec.role_arn)
            .data_privacy(data_privacy(spec.child_directed))
            .idle_session_ttl_in_seconds(spec.idle_session_ttl_secs)
            .build()
            .map_err(|e| ServiceError::invalid_request(OP, e))?;

        let out = self
            .client
            .start_import()
            .import_id(import_id)
            .resource_specification(
                ImportResourceSpecification::builder()
                    .bot_import_specification(bot_spec)
                    .build(),
            )
            .merge_strategy(MergeStrategy::Overwrite)
            .send()
            .await
            .map_err(|e| ServiceError::from_sdk(OP, e))?;

        Ok(out.import_id().unwrap_or(import_id).to_string())
    }

    async fn describe_import(&self, import_id: &str) -> Result<ImportDescription> {
        const OP: &str = "DescribeImport";
        let out = self
            .client
            .describe_import()
            .import_id(import_id)
            .send()
            .await
            .map_err(|e| ServiceError::from_sdk(OP, e))?;

        Ok(ImportDescription {
            import_id: import_id.to_string(),
            status: out
                .import_status()
                .map(|s| JobStatus::from_wire(s.as_str()))
                .ok_or(ServiceError::MissingField {
                    operation: OP,
                    field: "importStatus",
                })?,
            failure_reasons: out.failure_reasons().to_vec(),
        })
    }

    async fn delete_import(&self, import_id: &str) -> Result<()> {
        self.client
            .delete_import()
            .import_id(import_id)
            .send()
            .await
            .map_err(|e| ServiceError::from_sdk("DeleteImport", e))?;
        Ok(())
    }

    async fn build_bot_locale(&self, bot_id: &str, version: &str, locale_id: &str) -> Result<()> {
        self.client
            .build_bot_locale()
            .bot_id(bot_id)
            .bot_version(version)
            .locale_id(locale_id)
            .send()
            .await
            .map_err(|e| ServiceError::from_sdk("BuildBotLocale", e))?;
        Ok(())
    }

    async fn describe_bot_locale(
        &self,
        bot_id: &str,
        version: &str,
        locale_id: &str,
    ) -> Result<LocaleDescription> {
        const OP: &str = "DescribeBotLocale";
        let out = self
            .client
            .describe_bot_locale()
            .bot_id(bot_id)
            .bot_version(version)
            .locale_id(locale_id)
            .send()
            .await
            .map_err(|e| ServiceError::from_sdk(OP, e))?;

        Ok(LocaleDescription {
            status: out
                .bot_locale_status()
                .map(|s| LocaleStatus::from_wire(s.as_str()))
                .ok_or(ServiceError::MissingField {
                    operation: OP,
                    field: "botLocaleStatus",
                })?,
            failure_reasons: out.failure_reasons().to_vec(),
        })
    }

    async fn create_bot_version(
        &self,
        bot_id: &str,
        source_version: &str,
        locale_id: &str,
    ) -> Result<String> {
        const OP: &str = "CreateBotVersion";
        let details = BotVersionLocaleDetails::builder()
            .source_bot_version(source_version)
            .build()
            .map_err(|e| ServiceError::invalid_request(OP, e))?;

        let out = self
            .client
            .create_bot_version()
            .bot_id(bot_id)
            .bot_version_locale_specification(locale_id, details)
            .send()
            .await
            .map_err(|e| ServiceError::from_sdk(OP, e))?;

        required(out.bot_version(), OP, "botVersion")
    }

    async fn describe_bot_version(&self, bot_id: &str, version: &str) -> Result<BotStatus> {
        const OP: &str = "DescribeBotVersion";
        let out = self
            .client
            .describe_bot_version()
            .bot_id(bot_id)
            .bot_version(version)
            .send()
            .await
            .map_err(|e| ServiceError::from_sdk(OP, e))?;

        out.bot_status()
            .map(|s| BotStatus::from_wire(s.as_str()))
            .ok_or(ServiceError::MissingField {
                operation: OP,
                field: "botStatus",
            })
    }

    async fn delete_bot_version(
        &self,
        bot_id: &str,
        version: &str,
        skip_resource_in_use_check: bool,
    ) -> Result<()> {
        self.client
            .delete_bot_version()
            .bot_id(bot_id)
            .bot_version(version)
            .skip_resource_in_use_check(skip_resource_in_use_check)
            .send()
            .await
            .map_err(|e| ServiceError::from_sdk("DeleteBotVersion", e))?;
        Ok(())
    }
}
