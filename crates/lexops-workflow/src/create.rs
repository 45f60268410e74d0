//! Create an empty bot and, optionally, its environment alias.

use lexops_service::NewBot;
use tracing::{info, warn};

use crate::error::Result;
use crate::naming::BotCoordinates;
use crate::ops::LexOps;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReport {
    pub bot_id: String,
    pub deployed_name: String,
    pub alias_id: Option<String>,
}

impl LexOps {
    /// Create the bot at `coords` with the role `role_name`.
    pub async fn create(
        &self,
        coords: &BotCoordinates,
        role_name: &str,
        alias: Option<&str>,
    ) -> Result<CreateReport> {
        self.run_create(coords, role_name, alias)
            .await
            .inspect_err(|e| warn!(operation = "create", bot = %coords, error = %e, "operation failed"))
    }

    async fn run_create(
        &self,
        coords: &BotCoordinates,
        role_name: &str,
        alias: Option<&str>,
    ) -> Result<CreateReport> {
        let lex = &self.services.lex;
        let deployed_name = coords.deployed_name();
        let role_arn = self.services.roles.role_arn(role_name).await?;

        let bot_id = lex
            .create_bot(&NewBot {
                name: deployed_name.clone(),
                description: deployed_name.clone(),
                role_arn,
                child_directed: false,
                idle_session_ttl_secs: self.config.idle_session_ttl_secs,
            })
            .await?;
        info!(bot = %deployed_name, %bot_id, "bot created");
        self.waiters.bot_available(&bot_id).await?;

        let alias_id = match alias {
            Some(alias) => {
                let alias_name = coords.alias_name(alias);
                let alias_id = lex
                    .create_bot_alias(&bot_id, &alias_name, &deployed_name)
                    .await?;
                info!(%bot_id, alias = %alias_name, %alias_id, "alias created");
                Some(alias_id)
            }
            None => None,
        };

        Ok(CreateReport {
            bot_id,
            deployed_name,
            alias_id,
        })
    }
}
