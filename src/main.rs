use anyhow::Result;
use clap::Parser;
use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;

use food_swipe::config::DATA_DIR_ENV;
use food_swipe::{
    photo, AppConfig, Category, Choice, DragState, FavoritesLedger, NewRecipe, RecipeStore,
    SessionState, SwipeSession, TAG_VOCABULARY,
};

/// Swipe through recipes from the terminal
#[derive(Parser, Debug)]
#[command(name = "food-swipe", version, about)]
struct Args {
    /// Folder holding recipes.json and favorites.json
    #[arg(long, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Start with this tag selected (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,
}

/// Application messages (events)
#[derive(Debug, Clone, PartialEq)]
enum Message {
    Like,
    Dislike,
    /// Pointer down on the card at this x
    Press(f32),
    /// Pointer moved to this x
    Move(f32),
    Release,
    /// Whole drag in one step: press, move by this offset, release
    Drag(f32),
    ToggleTag(String),
    Restart,
    ShowFavorites,
    /// 1-based index into the favorites list
    Unfavorite(usize),
    /// Post a recipe; the photo is read from `image_path` into the draft
    AddRecipe {
        image_path: PathBuf,
        draft: NewRecipe,
    },
    /// 1-based index into the user recipe list
    DeleteRecipe(usize),
    ListRecipes,
    Help,
    /// Input that could not be understood, with the reason
    Rejected(String),
    Quit,
}

/// Main application state
struct FoodSwipe {
    config: AppConfig,
    store: RecipeStore,
    favorites: FavoritesLedger,
    session: SwipeSession,
    drag: DragState,
    /// Status message to display to the user
    status: String,
}

impl FoodSwipe {
    /// Create a new instance of the application
    fn new(config: AppConfig, tags: BTreeSet<String>) -> Self {
        let store = RecipeStore::open(config.recipes_path());

        let favorites = if config.persist_favorites {
            FavoritesLedger::open(config.favorites_path(), store.all_recipes())
        } else {
            FavoritesLedger::in_memory()
        };

        let session = SwipeSession::new(store.all_recipes(), tags);
        let status = format!(
            "Ready. {} recipes, {} favorites.",
            store.all_recipes().count(),
            favorites.len()
        );

        Self {
            config,
            store,
            favorites,
            session,
            drag: DragState::default(),
            status,
        }
    }

    /// Handle a message and update state. Returns false to quit.
    fn update(&mut self, message: Message) -> bool {
        match message {
            Message::Like => self.decide(Choice::Like),
            Message::Dislike => self.decide(Choice::Dislike),
            Message::Press(x) => {
                self.drag.press(x);
                self.status = "Dragging...".to_string();
            }
            Message::Move(x) => {
                let offset = self.drag.moved(x);
                self.status = format!("Card offset {:+.0}", offset);
            }
            Message::Release => self.release_drag(),
            Message::Drag(dx) => {
                self.drag.press(0.0);
                self.drag.moved(dx);
                self.release_drag();
            }
            Message::ToggleTag(tag) => {
                self.session.toggle_tag(self.store.all_recipes(), &tag);
                self.status = format!(
                    "Filter: {}. {} cards.",
                    describe_tags(self.session.selected_tags()),
                    self.session.len()
                );
            }
            Message::Restart => {
                self.restart_session();
                self.status = format!("Starting over with {} cards.", self.session.len());
            }
            Message::ShowFavorites => {
                self.status = if self.favorites.is_empty() {
                    "No favorites yet.".to_string()
                } else {
                    numbered(self.favorites.recipes().iter().map(|r| r.title()))
                };
            }
            Message::Unfavorite(n) => {
                let target = n
                    .checked_sub(1)
                    .and_then(|i| self.favorites.recipes().get(i))
                    .map(|r| r.id());
                self.status = match target {
                    Some(id) => {
                        self.favorites.remove_id(id);
                        "Removed from favorites.".to_string()
                    }
                    None => format!("No favorite #{}.", n),
                };
            }
            Message::AddRecipe { image_path, draft } => self.add_recipe(image_path, draft),
            Message::DeleteRecipe(n) => {
                let target = n
                    .checked_sub(1)
                    .and_then(|i| self.store.user_recipes().get(i))
                    .map(|r| r.id());
                self.status = match target.and_then(|id| self.store.delete_recipe(id)) {
                    Some(removed) => {
                        self.favorites.remove_id(removed.id());
                        self.restart_session();
                        format!("Deleted '{}'.", removed.title())
                    }
                    None => format!("No recipe #{}.", n),
                };
            }
            Message::ListRecipes => {
                self.status = if self.store.user_recipes().is_empty() {
                    "No recipes saved yet! Add one with: add <title> | <image path> | <tags>"
                        .to_string()
                } else {
                    numbered(self.store.user_recipes().iter().map(|r| r.title()))
                };
            }
            Message::Help => self.status = HELP.to_string(),
            Message::Rejected(reason) => self.status = reason,
            Message::Quit => return false,
        }
        true
    }

    fn decide(&mut self, choice: Choice) {
        self.status = match self.session.decide(choice, &mut self.favorites) {
            Some(_) if choice == Choice::Like => "❤️  Saved to favorites.".to_string(),
            Some(_) => "👋 Skipped.".to_string(),
            None => "No more cards. Change the filter or restart.".to_string(),
        };
    }

    fn release_drag(&mut self) {
        let outcome = self.drag.release(self.config.swipe_threshold);
        match outcome.choice() {
            Some(choice) => self.decide(choice),
            None => self.status = "Not far enough, card springs back.".to_string(),
        }
    }

    fn add_recipe(&mut self, image_path: PathBuf, mut draft: NewRecipe) {
        draft.image_bytes = match photo::read_photo(&image_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.status = format!("Could not use {}: {}", image_path.display(), e);
                return;
            }
        };

        self.status = match self.store.add_recipe(draft) {
            Ok(recipe) => format!("Posted '{}'.", recipe.title()),
            Err(e) => e.to_string(),
        };
    }

    fn restart_session(&mut self) {
        let tags = self.session.selected_tags().clone();
        self.session.set_filter(self.store.all_recipes(), tags);
    }

    /// Render the current card and status line
    fn view(&self) -> String {
        let card = match (self.session.state(), self.session.current()) {
            (SessionState::Active(i), Some(recipe)) => {
                let thumb = recipe.thumbnail(self.config.thumbnail_size);
                let mut lines = vec![
                    format!("[{}/{}] {}", i + 1, self.session.len(), recipe.title()),
                    format!(
                        "{} | {} cal | {} | photo {}x{}",
                        recipe.category(),
                        or_dash(recipe.calories()),
                        or_dash(recipe.prep_time()),
                        thumb.width(),
                        thumb.height()
                    ),
                ];
                if !recipe.ingredients().is_empty() {
                    lines.push(format!("Ingredients: {}", recipe.ingredients()));
                }
                if !recipe.tag_list().is_empty() {
                    lines.push(format!("Tags: {}", recipe.tag_list().join(" · ")));
                }
                if self.favorites.is_favorited(recipe) {
                    lines.push("❤️  in favorites".to_string());
                }
                lines.join("\n")
            }
            _ => "🍽️  You've seen every card.".to_string(),
        };

        format!(
            "\n{}\nFilter: {}\n{}\n",
            card,
            describe_tags(self.session.selected_tags()),
            self.status
        )
    }
}

const HELP: &str = "l = like, d = dislike, drag <dx>, press <x> / move <x> / release, \
tag <name>, restart, favs, unfav <n>, \
add <title> | <image path> | <tags> [| category=Lunch; calories=300; prep=20 minutes; \
price=$5; ingredients=...; instructions=...], list, rm <n>, q = quit";

/// Parse one line of input into a message
fn parse_command(line: &str) -> Option<Message> {
    let line = line.trim();
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    match cmd {
        "l" | "like" => Some(Message::Like),
        "d" | "dislike" => Some(Message::Dislike),
        "drag" => rest.parse().ok().map(Message::Drag),
        "press" => rest.parse().ok().map(Message::Press),
        "move" => rest.parse().ok().map(Message::Move),
        "release" => Some(Message::Release),
        "tag" if !rest.is_empty() => Some(Message::ToggleTag(rest.to_string())),
        "restart" => Some(Message::Restart),
        "favs" => Some(Message::ShowFavorites),
        "unfav" => rest.parse().ok().map(Message::Unfavorite),
        "add" => Some(parse_add(rest).unwrap_or_else(Message::Rejected)),
        "list" => Some(Message::ListRecipes),
        "rm" => rest.parse().ok().map(Message::DeleteRecipe),
        "h" | "help" | "?" => Some(Message::Help),
        "q" | "quit" | "exit" => Some(Message::Quit),
        _ => None,
    }
}

/// `<title> | <image path> | <tags> | key=value; key=value`.
/// Only the title and image path are required.
fn parse_add(rest: &str) -> std::result::Result<Message, String> {
    let mut parts = rest.splitn(4, '|').map(str::trim);
    let title = parts.next().unwrap_or_default();
    let image_path = PathBuf::from(parts.next().unwrap_or_default());
    let tags = parts.next().unwrap_or_default();

    let mut draft = NewRecipe::new(title, Vec::new()).tags(tags);
    for field in parts.next().unwrap_or_default().split(';') {
        let field = field.trim();
        if field.is_empty() {
            continue;
        }
        let (key, value) = field
            .split_once('=')
            .map(|(k, v)| (k.trim(), v.trim()))
            .ok_or_else(|| format!("Expected key=value, got '{}'.", field))?;
        draft = match key {
            "category" => draft.category(value.parse::<Category>().map_err(|e| e.to_string())?),
            "calories" => draft.calories(value),
            "prep" | "prep_time" => draft.prep_time(value),
            "price" => draft.price(value),
            "ingredients" => draft.ingredients(value),
            "instructions" => draft.instructions(value.replace("\\n", "\n")),
            _ => return Err(format!("Unknown recipe field '{}'.", key)),
        };
    }

    Ok(Message::AddRecipe { image_path, draft })
}

/// Tags from `--tag` flags, trimmed, blanks dropped
fn initial_tags(flags: &[String]) -> BTreeSet<String> {
    flags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn describe_tags(tags: &BTreeSet<String>) -> String {
    if tags.is_empty() {
        "all recipes".to_string()
    } else {
        tags.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

fn numbered<'a>(titles: impl Iterator<Item = &'a str>) -> String {
    titles
        .enumerate()
        .map(|(i, t)| format!("{}. {}", i + 1, t))
        .collect::<Vec<_>>()
        .join("\n")
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = AppConfig::resolve(args.data_dir.as_deref());
    info!(
        "🍝 FoodSwipe v{} using {}",
        env!("CARGO_PKG_VERSION"),
        config.data_dir.display()
    );

    let tags = initial_tags(&args.tags);
    let mut app = FoodSwipe::new(config, tags);

    println!("Welcome to FoodSwipe! Known tags: {}", TAG_VOCABULARY.join(", "));
    println!("{}", HELP);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print!("{}> ", app.view());
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        match parse_command(&line) {
            Some(message) => {
                if !app.update(message) {
                    break;
                }
            }
            None if line.trim().is_empty() => {}
            None => app.status = format!("Unknown command '{}'. Type help.", line.trim()),
        }
        print!("{}> ", app.view());
        stdout.flush()?;
    }

    info!("👋 Bye");
    Ok(())
}
