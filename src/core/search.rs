/// Search and filter engine
///
/// Computes the visible, paginated subset of the recipe list from the current
/// free-text query and filter criteria, recomputing reactively as inputs
/// change. Query and criteria edits are debounced; list changes apply
/// immediately.

use crate::db::{FilterCriteria, Recipe};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

/// Fixed number of results per page
pub const PAGE_SIZE: usize = 10;

/// Quiet period before an edited query or criteria triggers a recompute
const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Simulated latency for loading the next page. Placeholder for a real paged
/// backend round trip; a real implementation would swap the sleep for the
/// request without changing the page-advance semantics.
const PAGE_FETCH_LATENCY: Duration = Duration::from_millis(800);

/// Search engine statistics, for debugging and tests
#[derive(Debug, Clone)]
pub struct SearchStats {
    pub recomputes: u64,
    pub match_count: usize,
    pub current_page: usize,
}

struct SearchState {
    all_recipes: Vec<Recipe>,
    query: String,
    criteria: FilterCriteria,
    current_page: usize,
    match_count: usize,
    visible: Vec<Recipe>,
    is_loading_page: bool,
    recomputes: u64,
    debounce: Option<JoinHandle<()>>,
    results: watch::Sender<Vec<Recipe>>,
}

impl SearchState {
    /// Apply the filters and cut the current page window
    fn recompute(&mut self) {
        let filtered: Vec<Recipe> = self
            .all_recipes
            .iter()
            .filter(|r| matches(r, &self.query, &self.criteria))
            .cloned()
            .collect();

        self.match_count = filtered.len();

        let limit = (self.current_page * PAGE_SIZE).min(filtered.len());
        self.visible = filtered.into_iter().take(limit).collect();

        self.recomputes += 1;
        self.results.send_replace(self.visible.clone());
    }
}

/// The main filtering predicate: a strict conjunction of all clauses
fn matches(recipe: &Recipe, query: &str, criteria: &FilterCriteria) -> bool {
    // 1. Text search over title + description + instruction steps
    if !query.is_empty() {
        let needle = query.to_lowercase();
        let haystack = format!(
            "{}{}{}",
            recipe.title,
            recipe.description,
            recipe.instructions.concat()
        )
        .to_lowercase();
        if !haystack.contains(&needle) {
            return false;
        }
    }

    // 2. Dietary attributes: each enabled toggle must be set on the recipe
    let attr = &recipe.dietary_attributes;
    if criteria.vegetarian && !attr.vegetarian {
        return false;
    }
    if criteria.vegan && !attr.vegan {
        return false;
    }
    if criteria.gluten_free && !attr.gluten_free {
        return false;
    }
    if criteria.sugar_free && !attr.sugar_free {
        return false;
    }

    // 3. Servings
    if recipe.servings < criteria.min_servings {
        return false;
    }

    // 4. Exclusions: fail fast on any avoided ingredient (exact name match)
    let names = recipe.ingredient_names_lowercase();
    if names.iter().any(|n| criteria.excluded_ingredients.contains(n)) {
        return false;
    }

    // 5. Inclusions: every term must appear in some ingredient name
    //    (substring match, unlike the exact match above; the asymmetry is
    //    part of the contract)
    if !criteria.included_ingredients.is_empty() {
        let all_present = criteria.included_ingredients.iter().all(|included| {
            let term = included.to_lowercase();
            names.iter().any(|n| n.contains(&term))
        });
        if !all_present {
            return false;
        }
    }

    true
}

/// Reactive search over the repository's published list
///
/// Cheap to clone; all clones share one state. Must be used inside a tokio
/// runtime, since debounced edits are applied from a spawned timer task.
#[derive(Clone)]
pub struct SearchEngine {
    inner: Arc<Mutex<SearchState>>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine {
    pub fn new() -> Self {
        let (results, _) = watch::channel(Vec::new());

        Self {
            inner: Arc::new(Mutex::new(SearchState {
                all_recipes: Vec::new(),
                query: String::new(),
                criteria: FilterCriteria::default(),
                current_page: 1,
                match_count: 0,
                visible: Vec::new(),
                is_loading_page: false,
                recomputes: 0,
                debounce: None,
                results,
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, SearchState> {
        self.inner.lock().expect("search state lock poisoned")
    }

    /// Subscribe to the visible result window
    pub fn subscribe(&self) -> watch::Receiver<Vec<Recipe>> {
        self.state().results.subscribe()
    }

    /// The current visible result window
    pub fn visible(&self) -> Vec<Recipe> {
        self.state().visible.clone()
    }

    pub fn query(&self) -> String {
        self.state().query.clone()
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.state().criteria.clone()
    }

    pub fn is_loading_page(&self) -> bool {
        self.state().is_loading_page
    }

    pub fn stats(&self) -> SearchStats {
        let state = self.state();
        SearchStats {
            recomputes: state.recomputes,
            match_count: state.match_count,
            current_page: state.current_page,
        }
    }

    /// Replace the full list (the repository's latest snapshot) and recompute
    /// immediately
    pub fn set_recipes(&self, recipes: Vec<Recipe>) {
        let mut state = self.state();
        state.all_recipes = recipes;
        state.recompute();
    }

    /// Update the free-text query; recomputes after the debounce quiet period
    pub fn set_query(&self, query: impl Into<String>) {
        let mut state = self.state();
        state.query = query.into();
        self.schedule_recompute(&mut state);
    }

    /// Update the filter criteria; recomputes after the debounce quiet period
    pub fn set_criteria(&self, criteria: FilterCriteria) {
        let mut state = self.state();
        state.criteria = criteria;
        self.schedule_recompute(&mut state);
    }

    /// Trailing-edge debounce: a newer edit drops any pending recompute, so
    /// at most one timer task is outstanding. On fire, the page resets to 1
    /// and a single recompute runs with whatever the inputs are by then.
    fn schedule_recompute(&self, state: &mut SearchState) {
        if let Some(pending) = state.debounce.take() {
            pending.abort();
        }

        let engine = self.clone();
        state.debounce = Some(tokio::spawn(async move {
            sleep(SEARCH_DEBOUNCE).await;

            let mut state = engine.state();
            state.current_page = 1;
            state.recompute();
        }));
    }

    /// Advance to the next page of results
    ///
    /// No-op while a page load is in flight, when the query is empty
    /// (pagination only engages during active search), or when every match is
    /// already visible.
    pub async fn load_next_page(&self) {
        {
            let mut state = self.state();
            if state.is_loading_page || state.query.is_empty() {
                return;
            }
            if state.visible.len() >= state.match_count {
                return;
            }
            state.is_loading_page = true;
        }

        sleep(PAGE_FETCH_LATENCY).await;

        let mut state = self.state();
        state.current_page += 1;
        state.recompute();
        state.is_loading_page = false;
    }

    /// Mirror a repository subscription into this engine
    ///
    /// Applies the current snapshot immediately, then every later publish.
    pub fn follow(&self, mut recipes: watch::Receiver<Vec<Recipe>>) -> JoinHandle<()> {
        let engine = self.clone();
        engine.set_recipes(recipes.borrow_and_update().clone());

        tokio::spawn(async move {
            while recipes.changed().await.is_ok() {
                let snapshot = recipes.borrow_and_update().clone();
                engine.set_recipes(snapshot);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DietaryAttributes, Ingredient};

    fn recipe(id: &str, title: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            servings: 2,
            ingredients: vec![],
            instructions: vec![],
            dietary_attributes: DietaryAttributes::default(),
            image_url: None,
            creator_id: None,
        }
    }

    fn many_matching(count: usize) -> Vec<Recipe> {
        (1..=count)
            .map(|i| recipe(&i.to_string(), &format!("Pasta Dish {}", i)))
            .collect()
    }

    #[test]
    fn test_match_empty_query_matches_everything() {
        let criteria = FilterCriteria::default();
        assert!(matches(&recipe("1", "Anything"), "", &criteria));
    }

    #[test]
    fn test_match_text_searches_title_description_and_instructions() {
        let criteria = FilterCriteria::default();

        let mut r = recipe("1", "Plain Title");
        r.description = "Great for Brunch".to_string();
        r.instructions = vec!["Simmer gently.".to_string()];

        assert!(matches(&r, "brunch", &criteria));
        assert!(matches(&r, "SIMMER", &criteria));
        assert!(matches(&r, "plain", &criteria));
        assert!(!matches(&r, "pizza", &criteria));
    }

    #[test]
    fn test_match_dietary_toggles_require_attribute() {
        let mut criteria = FilterCriteria::default();
        criteria.vegan = true;

        let mut vegan = recipe("1", "Tofu Bowl");
        vegan.dietary_attributes.vegan = true;
        let not_vegan = recipe("2", "Cheese Bowl");

        assert!(matches(&vegan, "", &criteria));
        assert!(!matches(&not_vegan, "", &criteria));
    }

    #[test]
    fn test_match_min_servings() {
        let mut criteria = FilterCriteria::default();
        criteria.min_servings = 4;

        let mut small = recipe("1", "For Two");
        small.servings = 2;
        let mut big = recipe("2", "For Six");
        big.servings = 6;

        assert!(!matches(&small, "", &criteria));
        assert!(matches(&big, "", &criteria));
    }

    #[test]
    fn test_match_excluded_is_exact_name_membership() {
        let mut criteria = FilterCriteria::default();
        criteria.excluded_ingredients.insert("peanuts".to_string());

        let mut with_peanuts = recipe("1", "Satay");
        with_peanuts.ingredients = vec![Ingredient::new("Peanuts", "1 cup")];
        assert!(!matches(&with_peanuts, "", &criteria));

        // Exclusion is exact, not substring: "peanut butter" survives
        let mut with_butter = recipe("2", "Sandwich");
        with_butter.ingredients = vec![Ingredient::new("Peanut Butter", "2 tbsp")];
        assert!(matches(&with_butter, "", &criteria));
    }

    #[test]
    fn test_match_included_is_substring() {
        let mut criteria = FilterCriteria::default();
        criteria.included_ingredients.insert("egg".to_string());

        let mut omelette = recipe("1", "Omelette");
        omelette.ingredients = vec![
            Ingredient::new("Egg Whites", "3"),
            Ingredient::new("Milk", "1/4 cup"),
        ];
        let mut bread = recipe("2", "Bread");
        bread.ingredients = vec![Ingredient::new("Flour", "2 cups")];

        assert!(matches(&omelette, "", &criteria));
        assert!(!matches(&bread, "", &criteria));
    }

    #[test]
    fn test_match_included_requires_every_term() {
        let mut criteria = FilterCriteria::default();
        criteria.included_ingredients.insert("egg".to_string());
        criteria.included_ingredients.insert("milk".to_string());

        let mut only_eggs = recipe("1", "Scramble");
        only_eggs.ingredients = vec![Ingredient::new("Eggs", "2")];
        assert!(!matches(&only_eggs, "", &criteria));

        let mut both = recipe("2", "Custard");
        both.ingredients = vec![
            Ingredient::new("Eggs", "2"),
            Ingredient::new("Whole Milk", "1 cup"),
        ];
        assert!(matches(&both, "", &criteria));
    }

    #[test]
    fn test_match_is_a_strict_conjunction() {
        let mut criteria = FilterCriteria::default();
        criteria.vegetarian = true;
        criteria.min_servings = 2;
        criteria.included_ingredients.insert("rice".to_string());

        let mut r = recipe("1", "Veggie Rice Bowl");
        r.servings = 4;
        r.dietary_attributes.vegetarian = true;
        r.ingredients = vec![Ingredient::new("Brown Rice", "1 cup")];
        assert!(matches(&r, "bowl", &criteria));

        // Breaking any single clause fails the whole predicate
        assert!(!matches(&r, "pizza", &criteria));

        let mut bad_servings = r.clone();
        bad_servings.servings = 1;
        assert!(!matches(&bad_servings, "bowl", &criteria));

        let mut bad_dietary = r.clone();
        bad_dietary.dietary_attributes.vegetarian = false;
        assert!(!matches(&bad_dietary, "bowl", &criteria));
    }

    #[tokio::test]
    async fn test_set_recipes_recomputes_immediately() {
        let engine = SearchEngine::new();
        assert_eq!(engine.stats().recomputes, 0);

        engine.set_recipes(many_matching(3));

        assert_eq!(engine.stats().recomputes, 1);
        assert_eq!(engine.visible().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_collapses_rapid_edits_into_one_recompute() {
        let engine = SearchEngine::new();
        engine.set_recipes(many_matching(5));
        let baseline = engine.stats().recomputes;

        engine.set_query("p");
        engine.set_query("pa");
        engine.set_query("pasta dish 3");

        // Nothing happens inside the quiet period
        assert_eq!(engine.stats().recomputes, baseline);

        sleep(Duration::from_millis(400)).await;

        // One recompute, using the final value
        assert_eq!(engine.stats().recomputes, baseline + 1);
        assert_eq!(engine.visible().len(), 1);
        assert_eq!(engine.visible()[0].title, "Pasta Dish 3");
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounced_edit_resets_page() {
        let engine = SearchEngine::new();
        engine.set_recipes(many_matching(25));

        engine.set_query("pasta");
        sleep(Duration::from_millis(400)).await;
        engine.load_next_page().await;
        assert_eq!(engine.stats().current_page, 2);
        assert_eq!(engine.visible().len(), 20);

        let mut criteria = FilterCriteria::default();
        criteria.min_servings = 2;
        engine.set_criteria(criteria);
        sleep(Duration::from_millis(400)).await;

        assert_eq!(engine.stats().current_page, 1);
        assert_eq!(engine.visible().len(), PAGE_SIZE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pagination_is_monotone_and_bounded() {
        let engine = SearchEngine::new();
        engine.set_recipes(many_matching(25));
        engine.set_query("pasta");
        sleep(Duration::from_millis(400)).await;

        assert_eq!(engine.visible().len(), 10);

        engine.load_next_page().await;
        assert_eq!(engine.visible().len(), 20);

        engine.load_next_page().await;
        assert_eq!(engine.visible().len(), 25);

        // Everything is visible: further loads are no-ops
        let recomputes = engine.stats().recomputes;
        engine.load_next_page().await;
        assert_eq!(engine.visible().len(), 25);
        assert_eq!(engine.stats().recomputes, recomputes);
        assert!(!engine.is_loading_page());
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_next_page_is_noop_without_query() {
        let engine = SearchEngine::new();
        engine.set_recipes(many_matching(20));

        assert_eq!(engine.visible().len(), 10);

        engine.load_next_page().await;

        // Browsing the unfiltered list is not paginated by this engine
        assert_eq!(engine.visible().len(), 10);
        assert_eq!(engine.stats().current_page, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_page_loads_advance_once() {
        let engine = SearchEngine::new();
        engine.set_recipes(many_matching(30));
        engine.set_query("pasta");
        sleep(Duration::from_millis(400)).await;

        tokio::join!(engine.load_next_page(), engine.load_next_page());

        assert_eq!(engine.stats().current_page, 2);
        assert_eq!(engine.visible().len(), 20);
    }

    #[tokio::test(start_paused = true)]
    async fn test_follow_mirrors_repository_publishes() {
        let (tx, rx) = watch::channel(many_matching(2));
        let engine = SearchEngine::new();
        let handle = engine.follow(rx);

        assert_eq!(engine.visible().len(), 2);

        tx.send_replace(many_matching(4));
        sleep(Duration::from_millis(1)).await;

        assert_eq!(engine.visible().len(), 4);
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_subscription_sees_window() {
        let engine = SearchEngine::new();
        let mut rx = engine.subscribe();

        engine.set_recipes(many_matching(3));

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 3);
    }
}
