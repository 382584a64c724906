//! General Discord commands - ping and help.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say(help_text(&ctx.data().settings.prefix)).await?;
        Ok(())
    }

    pub(crate) fn help_text(prefix: &str) -> String {
        format!(
            "**Fortune Bot Help**\n\
            A fortune is posted every day. Community submissions are posted first once approved.\n\n\
            **Everyone**\n\
            • `{prefix}add <fortune>` - Submit a fortune for approval.\n\
            • `{prefix}ping` - Checks if the bot is responsive.\n\
            • `{prefix}help` - Shows this help message.\n\n\
            **Administrators**\n\
            • `{prefix}pending` - Lists submissions awaiting approval.\n\
            • `{prefix}approve <submission id>` / `{prefix}reject <submission id>` - Moderate a submission.\n\
            • `{prefix}remove <fortune id>` - Deletes a guild fortune.\n\
            • `{prefix}list` - Lists every fortune.\n\
            • `{prefix}reset` - Marks every fortune unused and restarts the rotation.\n\
            • `{prefix}post` - Posts the next fortune now.\n\
            • `{prefix}say <text>` - Posts text to the fortune channel.\n\
            • `{prefix}export` - Writes all fortunes and submissions to a JSON file."
        )
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_help_uses_prefix() {
            let text = help_text("batune ");
            assert!(text.contains("`batune add <fortune>`"));
            assert!(text.contains("`batune export`"));
        }
    }
}

// Re-export all commands
pub use inner::*;
