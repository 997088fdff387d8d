//! Catalog operations over a [`CatalogRepository`].
//!
//! Every call re-reads the full catalog; nothing is cached between calls.

use tracing::{debug, info};

use crate::{
    error::StoreResult,
    models::{GameRecord, Price},
    store::CatalogRepository,
};

/// Game catalog backed by a repository.
#[derive(Debug, Clone)]
pub struct GameCatalog<R> {
    repo: R,
}

impl<R: CatalogRepository> GameCatalog<R> {
    /// Wrap a repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Every game, in file order.
    pub fn list(&self) -> StoreResult<Vec<GameRecord>> {
        self.repo.load()
    }

    /// Add a game unless another one already uses the name (ignoring case).
    ///
    /// Returns `false` without writing anything on a collision.
    pub fn insert(&self, name: &str, genre: &str, price: Price) -> StoreResult<bool> {
        let mut games = self.repo.load()?;
        if games.iter().any(|game| game.same_name(name)) {
            debug!(name, "Insert rejected, name already taken");
            return Ok(false);
        }
        games.push(GameRecord::new(name, genre, price));
        self.repo.save_all(&games)?;
        info!(name, genre, %price, "Game added");
        Ok(true)
    }

    /// Games whose name or genre contains `term`, ignoring case.
    pub fn search(&self, term: &str) -> StoreResult<Vec<GameRecord>> {
        let needle = term.to_lowercase();
        Ok(self
            .repo
            .load()?
            .into_iter()
            .filter(|game| game.matches(&needle))
            .collect())
    }

    /// First game whose name is exactly `name`.
    pub fn find(&self, name: &str) -> StoreResult<Option<GameRecord>> {
        Ok(self.repo.load()?.into_iter().find(|game| game.name == name))
    }

    /// Overwrite the first game named exactly `old_name`.
    ///
    /// The catalog is saved back even when nothing matched. Returns whether a
    /// game was changed. The new name is not checked for collisions.
    pub fn update(
        &self,
        old_name: &str,
        new_name: &str,
        new_genre: &str,
        new_price: Price,
    ) -> StoreResult<bool> {
        let mut games = self.repo.load()?;
        let target = games.iter_mut().find(|game| game.name == old_name);
        let matched = match target {
            Some(game) => {
                game.name = new_name.to_string();
                game.genre = new_genre.to_string();
                game.price = new_price;
                true
            }
            None => false,
        };
        self.repo.save_all(&games)?;
        if matched {
            info!(old_name, new_name, new_genre, %new_price, "Game updated");
        } else {
            debug!(old_name, "Update matched no game");
        }
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileCatalog, MemoryCatalog};
    use anyhow::Result;
    use tempfile::tempdir;

    fn price(cents: i64) -> Price {
        Price::from_cents(cents)
    }

    #[test]
    fn insert_rejects_case_insensitive_duplicates() -> Result<()> {
        let catalog = GameCatalog::new(MemoryCatalog::new());
        assert!(catalog.insert("Zelda", "Adventure", price(30000))?);
        assert!(!catalog.insert("zelda", "RPG", price(100))?);

        let games = catalog.list()?;
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].genre, "Adventure");
        Ok(())
    }

    #[test]
    fn rejected_insert_does_not_write() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("games.txt");
        std::fs::write(&path, "Zelda;Adventure;cheap\n")?;

        let catalog = GameCatalog::new(FileCatalog::new(&path));
        assert!(!catalog.insert("ZELDA", "RPG", price(100))?);
        assert_eq!(std::fs::read_to_string(&path)?, "Zelda;Adventure;cheap\n");
        Ok(())
    }

    #[test]
    fn search_is_case_insensitive_on_name_or_genre() -> Result<()> {
        let catalog = GameCatalog::new(MemoryCatalog::with_games(vec![
            GameRecord::new("Final Fantasy", "RPG", price(9990)),
            GameRecord::new("Gran Turismo", "Racing", price(4990)),
        ]));

        let hits = catalog.search("rp")?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Final Fantasy");

        assert_eq!(catalog.search("TURISMO")?.len(), 1);
        assert!(catalog.search("shooter")?.is_empty());
        assert_eq!(catalog.search("")?.len(), 2);
        Ok(())
    }

    #[test]
    fn update_changes_only_first_exact_match() -> Result<()> {
        let repo = MemoryCatalog::with_games(vec![
            GameRecord::new("Foo", "A", price(100)),
            GameRecord::new("Foo", "B", price(200)),
            GameRecord::new("foo", "C", price(300)),
        ]);
        let catalog = GameCatalog::new(repo.clone());

        assert!(catalog.update("Foo", "Bar", "Z", price(999))?);
        assert_eq!(
            repo.snapshot(),
            vec![
                GameRecord::new("Bar", "Z", price(999)),
                GameRecord::new("Foo", "B", price(200)),
                GameRecord::new("foo", "C", price(300)),
            ]
        );
        Ok(())
    }

    #[test]
    fn update_miss_rewrites_unchanged() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("games.txt");
        std::fs::write(&path, "Doom;FPS;19.9\nbroken line\n")?;

        let catalog = GameCatalog::new(FileCatalog::new(&path));
        assert!(!catalog.update("doom", "Quake", "FPS", price(100))?);
        assert_eq!(std::fs::read_to_string(&path)?, "Doom;FPS;19.90\n");
        Ok(())
    }

    #[test]
    fn oversized_price_is_saved_as_zero() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("games.txt");
        std::fs::write(&path, "Big;X;1e20\n")?;

        let catalog = GameCatalog::new(FileCatalog::new(&path));
        assert!(catalog.insert("Small", "Y", price(100))?);
        assert_eq!(std::fs::read_to_string(&path)?, "Big;X;0.00\nSmall;Y;1.00\n");
        Ok(())
    }

    #[test]
    fn find_uses_exact_name() -> Result<()> {
        let catalog = GameCatalog::new(MemoryCatalog::with_games(vec![GameRecord::new(
            "Tetris",
            "Puzzle",
            price(500),
        )]));
        assert!(catalog.find("Tetris")?.is_some());
        assert!(catalog.find("tetris")?.is_none());
        Ok(())
    }
}
