/// Dashboard selector
///
/// Derives the two bounded display subsets shown on the dashboard from the
/// full recipe list. Purely derived and stateless given the inputs; callers
/// rerun it whenever the repository publishes a new list.

use crate::core::user::UserContext;
use crate::db::Recipe;
use rand::seq::SliceRandom;

/// Upper bound for each dashboard section
pub const DASHBOARD_SAMPLE_SIZE: usize = 5;

/// The two dashboard subsets
#[derive(Debug, Clone)]
pub struct DashboardSelection {
    /// Uniform random sample from the whole list, resampled on every call
    pub featured: Vec<Recipe>,
    /// Uniform random sample of the current user's own recipes
    pub owned: Vec<Recipe>,
}

/// Samples dashboard subsets for one user
pub struct DashboardSelector {
    user: UserContext,
}

impl DashboardSelector {
    pub fn new(user: UserContext) -> Self {
        Self { user }
    }

    /// Derive both subsets from the given list
    pub fn select(&self, recipes: &[Recipe]) -> DashboardSelection {
        let owned_pool: Vec<Recipe> = recipes
            .iter()
            .filter(|r| r.creator_id.as_deref() == Some(self.user.user_id.as_str()))
            .cloned()
            .collect();

        DashboardSelection {
            featured: sample(recipes.to_vec()),
            owned: sample(owned_pool),
        }
    }
}

/// Shuffle and keep at most `DASHBOARD_SAMPLE_SIZE` entries
fn sample(mut pool: Vec<Recipe>) -> Vec<Recipe> {
    pool.shuffle(&mut rand::rng());
    pool.truncate(DASHBOARD_SAMPLE_SIZE);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DietaryAttributes;

    fn recipe(id: &str, creator: Option<&str>) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: format!("Recipe {}", id),
            description: String::new(),
            servings: 2,
            ingredients: vec![],
            instructions: vec![],
            dietary_attributes: DietaryAttributes::default(),
            image_url: None,
            creator_id: creator.map(str::to_string),
        }
    }

    #[test]
    fn test_owned_contains_only_current_users_recipes() {
        // Nine owned by user_1, one by user_2
        let mut recipes: Vec<Recipe> =
            (1..=9).map(|i| recipe(&i.to_string(), Some("user_1"))).collect();
        recipes.push(recipe("10", Some("user_2")));

        let selector = DashboardSelector::new(UserContext::new("user_1"));
        let selection = selector.select(&recipes);

        assert_eq!(selection.owned.len(), DASHBOARD_SAMPLE_SIZE);
        assert!(selection
            .owned
            .iter()
            .all(|r| r.creator_id.as_deref() == Some("user_1")));
    }

    #[test]
    fn test_owned_is_bounded_by_owned_count() {
        let recipes = vec![
            recipe("1", Some("user_1")),
            recipe("2", None),
            recipe("3", Some("user_2")),
        ];

        let selector = DashboardSelector::new(UserContext::new("user_1"));
        let selection = selector.select(&recipes);

        assert_eq!(selection.owned.len(), 1);
        assert_eq!(selection.owned[0].id, "1");
    }

    #[test]
    fn test_featured_is_bounded_by_sample_size() {
        let recipes: Vec<Recipe> = (1..=20).map(|i| recipe(&i.to_string(), None)).collect();

        let selector = DashboardSelector::new(UserContext::new("user_1"));
        let selection = selector.select(&recipes);

        assert_eq!(selection.featured.len(), DASHBOARD_SAMPLE_SIZE);
    }

    #[test]
    fn test_empty_list_gives_empty_sections() {
        let selector = DashboardSelector::new(UserContext::new("user_1"));
        let selection = selector.select(&[]);

        assert!(selection.featured.is_empty());
        assert!(selection.owned.is_empty());
    }

    #[test]
    fn test_featured_samples_are_distinct_recipes() {
        let recipes: Vec<Recipe> = (1..=20).map(|i| recipe(&i.to_string(), None)).collect();

        let selector = DashboardSelector::new(UserContext::new("user_1"));
        let selection = selector.select(&recipes);

        let mut ids: Vec<&str> = selection.featured.iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), DASHBOARD_SAMPLE_SIZE);
    }
}
