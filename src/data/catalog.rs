use crate::domain::order::{Ingredient, IngredientKind};

/// Read-only ingredient catalog served by the stub.
#[derive(Debug, Clone)]
pub struct IngredientCatalog {
    items: Vec<Ingredient>,
}

impl IngredientCatalog {
    pub fn new(items: Vec<Ingredient>) -> Self {
        Self { items }
    }

    /// The fixed set of ingredients the stub starts with.
    pub fn seeded() -> Self {
        use IngredientKind::{Bun, Main, Sauce};

        // (id suffix, name, kind, price, [proteins, fat, carbohydrates, calories])
        let seed: [(&str, &str, IngredientKind, u32, [u32; 4]); 15] = [
            ("3c", "Crater bun N-200i", Bun, 1255, [80, 24, 53, 420]),
            ("3d", "Fluorescent bun R2-D3", Bun, 988, [44, 26, 85, 643]),
            ("3e", "Immortal mollusc meat Protostomia", Main, 1337, [433, 244, 33, 420]),
            ("3f", "Spicy-X sauce", Sauce, 90, [30, 20, 40, 30]),
            ("40", "Martian Magnolia biocutlet", Main, 424, [420, 142, 242, 4242]),
            ("41", "Tetraodontiform fillet", Main, 988, [44, 26, 85, 643]),
            ("42", "Meteorite beef steak", Main, 3000, [800, 800, 300, 2674]),
            ("43", "Space sauce", Sauce, 80, [50, 22, 11, 14]),
            ("44", "Saturn mineral rings", Main, 300, [808, 689, 609, 986]),
            ("45", "Fallenian tree fruit", Main, 874, [20, 5, 55, 77]),
            ("46", "Martian alpha-saccharide crystals", Main, 762, [234, 432, 111, 189]),
            ("47", "Exo-Plantago mini salad", Main, 4400, [1, 2, 3, 6]),
            ("48", "Asteroid mould cheese", Main, 4142, [84, 48, 420, 3377]),
            ("49", "Traditional galactic sauce", Sauce, 15, [42, 24, 42, 99]),
            ("4a", "Antarctic spiked sauce", Sauce, 88, [101, 99, 100, 100]),
        ];

        let items = seed
            .into_iter()
            .map(|(suffix, name, kind, price, [proteins, fat, carbohydrates, calories])| {
                Ingredient {
                    id: format!("643d69a5c3f7b9001cfa09{}", suffix),
                    name: name.to_string(),
                    kind,
                    proteins,
                    fat,
                    carbohydrates,
                    calories,
                    price,
                }
            })
            .collect();

        Self::new(items)
    }

    pub fn all(&self) -> &[Ingredient] {
        &self.items
    }

    pub fn find(&self, id: &str) -> Option<&Ingredient> {
        self.items.iter().find(|i| i.id == id)
    }
}

impl Default for IngredientCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::is_object_id;
    use std::collections::HashSet;

    #[test]
    fn test_seeded_ids_are_unique_object_ids() {
        let catalog = IngredientCatalog::seeded();
        let ids: HashSet<&str> = catalog.all().iter().map(|i| i.id.as_str()).collect();

        assert_eq!(ids.len(), catalog.all().len());
        assert!(ids.iter().all(|id| is_object_id(id)));
    }

    #[test]
    fn test_seeded_catalog_has_every_kind() {
        let catalog = IngredientCatalog::seeded();
        for kind in [IngredientKind::Bun, IngredientKind::Main, IngredientKind::Sauce] {
            assert!(catalog.all().iter().any(|i| i.kind == kind));
        }
    }

    #[test]
    fn test_find_by_id() {
        let catalog = IngredientCatalog::seeded();
        let bun = catalog.find("643d69a5c3f7b9001cfa093c").unwrap();

        assert_eq!(bun.name, "Crater bun N-200i");
        assert!(catalog.find("643d69a5c3f7b9001cfa0900").is_none());
    }
}
