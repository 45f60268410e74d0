//! Delete a deployed bot.

use tracing::{info, warn};

use crate::error::{Result, WorkflowError};
use crate::naming::BotCoordinates;
use crate::ops::LexOps;

impl LexOps {
    /// Delete the bot at `coords` with all its versions and aliases.
    /// Returns the deleted bot id.
    pub async fn delete(&self, coords: &BotCoordinates) -> Result<String> {
        async {
            let bot = self.resolve(coords).await?;
            self.services.lex.delete_bot(&bot.bot_id, true).await?;
            info!(bot = %bot.deployed_name, bot_id = %bot.bot_id, "bot deletion requested");
            Ok::<_, WorkflowError>(bot.bot_id)
        }
        .await
        .inspect_err(|e| warn!(operation = "delete", bot = %coords, error = %e, "operation failed"))
    }
}
