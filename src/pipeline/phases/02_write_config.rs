use crate::pipeline::context::{MigrationRun, PipelineContext};
use crate::pipeline::error::MigrationError;
use crate::pipeline::phase_trait::MigrationPhase;
use crate::pipeline::state::MigrationState;
use crate::recipe::{CompositionError, RECIPE_CONFIG_FILE};
use async_trait::async_trait;
use tracing::info;

/// Serializes the composed document to `rewrite.yml` at the workspace root
pub struct WriteConfigPhase;

#[async_trait]
impl MigrationPhase for WriteConfigPhase {
    fn state(&self) -> MigrationState {
        MigrationState::WriteConfig
    }

    async fn execute(
        &self,
        run: &mut MigrationRun,
        _context: &PipelineContext,
    ) -> Result<(), MigrationError> {
        let document = run
            .document
            .as_ref()
            .ok_or(CompositionError::NothingToCompose)?;
        let yaml = document.to_yaml()?;

        let path = run.workspace.join(RECIPE_CONFIG_FILE);
        std::fs::write(&path, yaml).map_err(|source| MigrationError::WriteConfig {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), "Wrote recipe config");
        run.config_path = Some(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::phases::ComposePhase;
    use crate::pipeline::testing;
    use crate::plan::MigrationChoice;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_writes_rewrite_yml() {
        let (_dir, ws) = testing::workspace();
        let context = testing::context(&ws, 0, Arc::default());
        let mut run = testing::run(&ws, MigrationChoice::default());

        ComposePhase.execute(&mut run, &context).await.unwrap();
        WriteConfigPhase.execute(&mut run, &context).await.unwrap();

        let written = std::fs::read_to_string(ws.join("rewrite.yml")).unwrap();
        assert!(written.contains("recipeList"));
        assert!(written.contains("name: com.springshift.migration"));
        assert_eq!(run.config_path, Some(ws.join("rewrite.yml")));
    }

    #[tokio::test]
    async fn test_missing_document_is_error() {
        let (_dir, ws) = testing::workspace();
        let context = testing::context(&ws, 0, Arc::default());
        let mut run = testing::run(&ws, MigrationChoice::default());

        let err = WriteConfigPhase
            .execute(&mut run, &context)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MigrationError::Composition(CompositionError::NothingToCompose)
        ));
        assert!(!ws.join("rewrite.yml").exists());
    }

    #[tokio::test]
    async fn test_unwritable_workspace() {
        let (_dir, ws) = testing::workspace();
        let context = testing::context(&ws, 0, Arc::default());
        let mut run = testing::run(&ws.join("missing"), MigrationChoice::default());

        ComposePhase.execute(&mut run, &context).await.unwrap();
        let err = WriteConfigPhase
            .execute(&mut run, &context)
            .await
            .unwrap_err();
        assert!(matches!(err, MigrationError::WriteConfig { .. }));
    }
}
