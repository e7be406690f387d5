//! Left-fold of fragment documents into one recipe document

use super::{CompositionError, FragmentId, FragmentStore, RecipeDocument, RECIPE_LIST_KEY};
use tracing::debug;

pub struct RecipeComposer {
    store: FragmentStore,
}

impl RecipeComposer {
    pub fn new(store: FragmentStore) -> Self {
        Self { store }
    }

    /// Merges `fragments` in the given order.
    ///
    /// The first fragment is the base document (its headers survive); every
    /// following fragment is appended with [`RecipeDocument::merge`]. The first
    /// failure aborts the whole composition.
    pub fn compose(&self, fragments: &[FragmentId]) -> Result<RecipeDocument, CompositionError> {
        let (first, rest) = fragments
            .split_first()
            .ok_or(CompositionError::NothingToCompose)?;

        let base = self.store.load(*first)?;
        if base.entries(RECIPE_LIST_KEY).is_none() {
            return Err(CompositionError::MissingKey {
                key: RECIPE_LIST_KEY.to_string(),
                document: first.file_name().to_string(),
            });
        }

        rest.iter().try_fold(base, |acc, id| {
            let fragment = self.store.load(*id)?;
            let merged = acc.merge(&fragment, RECIPE_LIST_KEY).map_err(|e| match e {
                CompositionError::MissingKey { key, .. } => CompositionError::MissingKey {
                    key,
                    document: id.file_name().to_string(),
                },
                other => other,
            })?;
            debug!(
                fragment = %id,
                recipes = merged.entries(RECIPE_LIST_KEY).map_or(0, <[_]>::len),
                "Merged fragment"
            );
            Ok(merged)
        })
    }
}

impl Default for RecipeComposer {
    fn default() -> Self {
        Self::new(FragmentStore::Embedded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(files: &[(&str, &str)]) -> (TempDir, FragmentStore) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        let store = FragmentStore::Directory(dir.path().to_path_buf());
        (dir, store)
    }

    #[test]
    fn test_compose_in_declared_order() {
        let (_dir, store) = store_with(&[
            ("rewrite-manifestCleanup.yml", "name: n\nrecipeList:\n  - m1\n"),
            ("rewrite-java17.yml", "recipeList:\n  - j1\n  - j2\n"),
            ("rewrite-vaultCleanup.yml", "recipeList:\n  - v1\n"),
        ]);
        let composer = RecipeComposer::new(store);

        let doc = composer
            .compose(&[
                FragmentId::ManifestCleanup,
                FragmentId::Java17,
                FragmentId::VaultCleanup,
            ])
            .unwrap();

        assert_eq!(doc.recipe_names(), vec!["m1", "j1", "j2", "v1"]);
        assert_eq!(doc.name(), Some("n"));
    }

    #[test]
    fn test_compose_keeps_duplicates() {
        let (_dir, store) = store_with(&[
            ("rewrite-manifestCleanup.yml", "recipeList:\n  - same\n"),
            ("rewrite-vaultCleanup.yml", "recipeList:\n  - same\n"),
        ]);

        let doc = RecipeComposer::new(store)
            .compose(&[FragmentId::ManifestCleanup, FragmentId::VaultCleanup])
            .unwrap();
        assert_eq!(doc.recipe_names(), vec!["same", "same"]);
    }

    #[test]
    fn test_empty_selection_is_an_error() {
        assert!(matches!(
            RecipeComposer::default().compose(&[]),
            Err(CompositionError::NothingToCompose)
        ));
    }

    #[test]
    fn test_fragment_without_key_aborts() {
        let (_dir, store) = store_with(&[
            ("rewrite-manifestCleanup.yml", "recipeList:\n  - m1\n"),
            ("rewrite-java17.yml", "recipes:\n  - j1\n"),
        ]);

        let err = RecipeComposer::new(store)
            .compose(&[FragmentId::ManifestCleanup, FragmentId::Java17])
            .unwrap_err();
        assert!(matches!(
            err,
            CompositionError::MissingKey { ref document, .. } if document == "rewrite-java17.yml"
        ));
    }

    #[test]
    fn test_base_without_key_aborts() {
        let (_dir, store) = store_with(&[("rewrite-manifestCleanup.yml", "name: x\n")]);
        assert!(RecipeComposer::new(store)
            .compose(&[FragmentId::ManifestCleanup])
            .is_err());
    }

    #[test]
    fn test_compose_is_byte_identical_across_runs() {
        let composer = RecipeComposer::default();
        let ids = [
            FragmentId::ManifestCleanup,
            FragmentId::PostgresConnectorCleanup,
            FragmentId::SpringCloudPcfCleanup,
            FragmentId::AzureAd,
        ];

        let first = composer.compose(&ids).unwrap().to_yaml().unwrap();
        let second = composer.compose(&ids).unwrap().to_yaml().unwrap();
        assert_eq!(first, second);
    }
}
