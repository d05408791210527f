// plateful - your recipe box, synced and searchable from the terminal
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use anyhow::Context;
use plateful_lib::{
    core::{
        BundledRecipeSource, DashboardSelector, ImageStore, RecipeDraft, SearchEngine, UserContext,
    },
    db::{DietaryAttributes, Ingredient, RecipeStore},
    Database,
};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Grab whatever the user typed
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let command = &args[1];

    match command.as_str() {
        "sync" => handle_sync().await,
        "list" => handle_list().await,
        "search" => handle_search(&args[2..]).await,
        "add" => handle_add(&args[2..]).await,
        "delete" => handle_delete(&args[2..]).await,
        "mine" => handle_mine().await,
        "dashboard" => handle_dashboard().await,
        "status" => handle_status().await,
        "version" | "-v" | "--version" => {
            println!("plateful v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            Ok(())
        }
    }
}

async fn open_repository() -> anyhow::Result<plateful_lib::core::RecipeRepository> {
    let db = get_database().await?;
    let repo = plateful_lib::core::RecipeRepository::new(
        Arc::new(BundledRecipeSource::new()),
        Arc::new(db),
    )
    .await;
    Ok(repo)
}

async fn handle_sync() -> anyhow::Result<()> {
    let repo = open_repository().await?;

    match repo.sync().await {
        Ok(()) => println!("✓ Synced. {} recipes available.", repo.recipes().len()),
        Err(e) => eprintln!("✗ {}", e.user_message()),
    }

    Ok(())
}

async fn handle_list() -> anyhow::Result<()> {
    let repo = open_repository().await?;
    let recipes = repo.recipes();

    if recipes.is_empty() {
        println!("No recipes yet. Run 'plateful sync' to pull the catalog.");
        return Ok(());
    }

    println!("\nRecipes:");
    println!("{}", "=".repeat(60));
    for (i, recipe) in recipes.iter().enumerate() {
        let tags: Vec<&str> = recipe
            .dietary_attributes
            .active_tags()
            .iter()
            .map(|t| t.label)
            .collect();
        let tag_note = if tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", tags.join(", "))
        };
        println!(
            "{:3}. {} (serves {}){}  id={}",
            i + 1,
            recipe.title,
            recipe.servings,
            tag_note,
            recipe.id
        );
    }
    println!("{}", "=".repeat(60));

    Ok(())
}

async fn handle_search(args: &[String]) -> anyhow::Result<()> {
    if args.is_empty() {
        eprintln!("Error: No search query provided");
        return Ok(());
    }

    let query = args.join(" ");
    let repo = open_repository().await?;

    let engine = SearchEngine::new();
    engine.follow(repo.subscribe());
    engine.set_query(&query);

    // Give the debounce its quiet period before reading results
    tokio::time::sleep(Duration::from_millis(350)).await;

    let results = engine.visible();
    let total = engine.stats().match_count;

    if results.is_empty() {
        println!("No recipes found matching '{}'", query);
    } else {
        println!("\nShowing {} of {} recipe(s) matching '{}':", results.len(), total, query);
        println!("{}", "=".repeat(60));
        for (i, recipe) in results.iter().enumerate() {
            println!("{:3}. {} (serves {})", i + 1, recipe.title, recipe.servings);
        }
        println!("{}", "=".repeat(60));
    }

    Ok(())
}

async fn handle_add(args: &[String]) -> anyhow::Result<()> {
    // Parse flags into a draft
    let mut draft = RecipeDraft {
        servings: 1,
        ..Default::default()
    };
    let mut dietary = DietaryAttributes::default();
    let mut photo_path: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--title" => {
                i += 1;
                if i < args.len() {
                    draft.title = args[i].clone();
                }
            }
            "--description" => {
                i += 1;
                if i < args.len() {
                    draft.description = args[i].clone();
                }
            }
            "--servings" => {
                i += 1;
                if i < args.len() {
                    draft.servings = args[i].parse().unwrap_or(1);
                }
            }
            "--ingredient" => {
                // "Name:quantity", quantity optional
                i += 1;
                if i < args.len() {
                    let (name, quantity) =
                        args[i].split_once(':').unwrap_or((args[i].as_str(), ""));
                    draft.ingredients.push(Ingredient::new(name, quantity));
                }
            }
            "--step" => {
                i += 1;
                if i < args.len() {
                    draft.instructions.push(args[i].clone());
                }
            }
            "--photo" => {
                i += 1;
                if i < args.len() {
                    photo_path = Some(PathBuf::from(&args[i]));
                }
            }
            "--vegetarian" => dietary.vegetarian = true,
            "--vegan" => dietary.vegan = true,
            "--gluten-free" => dietary.gluten_free = true,
            "--sugar-free" => dietary.sugar_free = true,
            arg => {
                eprintln!("Unknown flag: {}", arg);
                return Ok(());
            }
        }
        i += 1;
    }
    draft.dietary_attributes = dietary;

    let db = get_database().await?;
    let user = UserContext::bootstrap(&db).await?;

    if let Some(path) = photo_path {
        let bytes = std::fs::read(&path)
            .with_context(|| format!("reading photo {}", path.display()))?;
        match image_store()?.save(&bytes) {
            Ok(file_name) => draft.image_url = Some(file_name),
            Err(e) => eprintln!("✗ {}", e.user_message()),
        }
    }

    let recipe = match draft.build(&user) {
        Ok(recipe) => recipe,
        Err(e) => {
            eprintln!("✗ {}", e.user_message());
            return Ok(());
        }
    };

    let repo = plateful_lib::core::RecipeRepository::new(
        Arc::new(BundledRecipeSource::new()),
        Arc::new(db),
    )
    .await;

    match repo.add_recipe(recipe.clone()).await {
        Ok(()) => println!("✓ Added '{}' (id={})", recipe.title, recipe.id),
        Err(e) => eprintln!("✗ {}", e.user_message()),
    }

    Ok(())
}

async fn handle_delete(args: &[String]) -> anyhow::Result<()> {
    let Some(id) = args.first() else {
        eprintln!("Error: No recipe id provided");
        return Ok(());
    };

    let repo = open_repository().await?;
    let Some(recipe) = repo.recipes().into_iter().find(|r| &r.id == id) else {
        println!("No recipe with id '{}'", id);
        return Ok(());
    };

    match repo.delete_recipe_with_image(&recipe, &image_store()?).await {
        Ok(()) => println!("✓ Deleted '{}'", recipe.title),
        Err(e) => eprintln!("✗ {}", e.user_message()),
    }

    Ok(())
}

async fn handle_mine() -> anyhow::Result<()> {
    let db = get_database().await?;
    let user = UserContext::bootstrap(&db).await?;
    let recipes = db.fetch_all().await;

    let mine: Vec<_> = recipes
        .iter()
        .filter(|r| r.creator_id.as_deref() == Some(user.user_id.as_str()))
        .collect();

    if mine.is_empty() {
        println!("You haven't created any recipes yet. Try 'plateful add'.");
    } else {
        println!("\nYour recipes ({}):", user.user_id);
        println!("{}", "=".repeat(60));
        for (i, recipe) in mine.iter().enumerate() {
            println!("{:3}. {}  id={}", i + 1, recipe.title, recipe.id);
        }
        println!("{}", "=".repeat(60));
    }

    Ok(())
}

async fn handle_dashboard() -> anyhow::Result<()> {
    let db = get_database().await?;
    let user = UserContext::bootstrap(&db).await?;
    let recipes = db.fetch_all().await;

    let selection = DashboardSelector::new(user.clone()).select(&recipes);

    println!("\nplateful Dashboard");
    println!("{}", "=".repeat(60));

    println!("\nFeatured:");
    if selection.featured.is_empty() {
        println!("  (nothing yet - run 'plateful sync')");
    }
    for recipe in &selection.featured {
        println!("  - {}", recipe.title);
    }

    println!("\nYours ({}):", user.user_id);
    if selection.owned.is_empty() {
        println!("  (none yet - run 'plateful add')");
    }
    for recipe in &selection.owned {
        println!("  - {}", recipe.title);
    }

    println!("{}", "=".repeat(60));

    Ok(())
}

async fn handle_status() -> anyhow::Result<()> {
    let db = get_database().await?;
    let user = UserContext::bootstrap(&db).await?;
    let stats = db.stats().await?;

    println!("\nplateful Status");
    println!("{}", "=".repeat(60));
    println!("  Database:     {}", db.path().display());
    println!("  User:         {}", user.user_id);
    println!("  Recipes:      {}", stats.total_recipes);
    println!("  Yours/owned:  {}", stats.owned_recipes);
    println!("{}", "=".repeat(60));

    Ok(())
}

async fn get_database() -> anyhow::Result<Database> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    let db_path = home.join(".plateful").join("recipes.db");
    Ok(Database::new(db_path).await?)
}

fn image_store() -> anyhow::Result<ImageStore> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    Ok(ImageStore::new(home.join(".plateful").join("images")))
}

fn print_usage() {
    println!(
        r#"plateful v{} - Your recipe box, everywhere

USAGE:
    plateful <COMMAND> [OPTIONS]

COMMANDS:
    sync                   Pull the recipe catalog into the local store
    list                   Show all stored recipes
    search <query>         Search recipes by text
    add [flags]            Create a recipe (see flags below)
    delete <id>            Delete a recipe (and its local photo)
    mine                   Show recipes you created
    dashboard              Featured picks and your recipes
    status                 Show store location and counts
    version                Show version
    help                   Show this help

ADD FLAGS:
    --title <text>             Recipe title (required)
    --description <text>       Short description
    --servings <n>             Number of servings (default: 1)
    --ingredient <name:qty>    Repeatable, e.g. --ingredient "Eggs:2"
    --step <text>              Repeatable instruction step
    --photo <path>             Attach a photo file
    --vegetarian --vegan --gluten-free --sugar-free

EXAMPLES:
    plateful sync
    plateful search salad
    plateful add --title "Banana Pancakes" --servings 2 \
        --ingredient "Bananas:2" --ingredient "Eggs:2" \
        --step "Blend everything." --step "Fry in batches." --vegetarian
    plateful delete 101
"#,
        env!("CARGO_PKG_VERSION")
    );
}
