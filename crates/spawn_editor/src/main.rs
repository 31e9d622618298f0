//! Spawn Map Editor
//!
//! Command-line front end over the editing core. Each subcommand opens the
//! data root named by the preferences, performs one action and exits.

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use spawn_editor::{
    EditorPreferences, EditorState, MapId, PlacementRow, PlacementSpec, NAME, VERSION,
};
use spawn_format::{SpawnCodec, NO_DIRECTION};

#[derive(Parser)]
#[command(name = "spawn_editor")]
#[command(about = "Inspect and edit MonsterSetBase spawn maps", long_about = None)]
struct Cli {
    /// Preferences file (default: <config dir>/spawn_editor/preferences.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Data root holding the catalog, spawn maps and images.
    /// Can also be set via SPAWN_EDITOR_ROOT
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List spawn map files
    Maps,

    /// List catalog entries, NPCs first
    Catalog {
        /// Filter by name or id
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Show the placements of a map
    Show {
        /// Map file name, e.g. "003 - Noria.txt"
        map: String,

        /// Filter rows by name or id
        #[arg(short, long, default_value = "")]
        search: String,

        /// Print placements as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report malformed lines of a map file
    Check {
        map: String,
    },

    /// Rewrite a map file in canonical form
    Resave {
        map: String,

        /// Print the encoded file instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Add a placement and save the map
    Place {
        map: String,

        #[arg(short, long)]
        monster: u32,

        /// Grid x, 0-255
        #[arg(short, long)]
        x: i32,

        /// Grid y, 0-255
        #[arg(short, long)]
        y: i32,

        /// Opposite corner of a spawn area
        #[arg(long, requires = "end_y")]
        end_x: Option<i32>,

        #[arg(long, requires = "end_x")]
        end_y: Option<i32>,

        #[arg(short, long)]
        quantity: Option<u32>,

        /// Facing 1-8, or -1 for none
        #[arg(short, long, default_value_t = NO_DIRECTION, allow_negative_numbers = true)]
        direction: i32,

        #[arg(short, long)]
        range: Option<u32>,
    },

    /// Write the current preferences to the preferences file
    InitConfig,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut preferences = EditorPreferences::load_or_default(cli.config.as_deref())?;
    if let Some(root) = cli.root {
        log::info!("Data root from command line: {:?}", root);
        preferences.data_root = root;
    }

    log::debug!("{} v{}", NAME, VERSION);

    match cli.command {
        Commands::InitConfig => {
            let path = cli
                .config
                .or_else(EditorPreferences::default_path)
                .ok_or("no config directory available, pass --config")?;
            preferences.save(&path)?;
            println!("Wrote preferences to {}", path.display());
        }
        Commands::Maps => {
            let state = EditorState::new(preferences);
            for id in state.list_maps()? {
                println!("{}", id);
            }
        }
        Commands::Catalog { search } => {
            let state = EditorState::new(preferences);
            let listing = state.catalog().search(&search);
            for definition in listing.npcs.iter().chain(listing.monsters.iter()) {
                println!(
                    "{:>5}  {:<8}  {}",
                    definition.id,
                    definition.kind.label(),
                    definition.display_name
                );
            }
        }
        Commands::Show { map, search, json } => {
            let mut state = EditorState::new(preferences);
            let id = MapId::new(map);
            state.open_map(id.clone())?;

            if json {
                let placements = state.document(&id).map(|doc| doc.placements()).unwrap_or_default();
                println!("{}", serde_json::to_string_pretty(placements)?);
            } else {
                for row in state.placement_rows(&search) {
                    match row {
                        PlacementRow::Header(header) => println!("{}", header),
                        PlacementRow::Entry { index, label, .. } => {
                            println!("{:>4}  {}", index, label)
                        }
                    }
                }
            }
        }
        Commands::Check { map } => {
            let state = EditorState::new(preferences);
            let path = state.preferences().spawn_path().join(&map);
            let map_number = spawn_format::MapFileName::parse(&map).map_number;
            let decoded = SpawnCodec::load(&path, state.catalog(), Some(map_number))?;

            for warning in &decoded.warnings {
                println!("{}", warning);
            }
            println!(
                "{}: {} placements, {} warnings, {} skipped lines",
                map,
                decoded.placements.len(),
                decoded.warnings.len(),
                decoded.skipped_lines()
            );
        }
        Commands::Resave { map, dry_run } => {
            let mut state = EditorState::new(preferences);
            let id = MapId::new(map);
            state.open_map(id.clone())?;

            if dry_run {
                let placements = state.document(&id).map(|doc| doc.placements()).unwrap_or_default();
                print!("{}", SpawnCodec::encode(placements, state.catalog()));
            } else {
                state.save(&id)?;
                println!("Saved {}", id);
            }
        }
        Commands::Place {
            map,
            monster,
            x,
            y,
            end_x,
            end_y,
            quantity,
            direction,
            range,
        } => {
            let mut state = EditorState::new(preferences);
            state.open_map(map.as_str())?;
            state.select_monster(monster)?;

            let brush = state.session.brush;
            let mut spec = PlacementSpec::point(monster, x, y)
                .with_range(range.unwrap_or(brush.range))
                .with_direction(direction)
                .with_quantity(quantity.unwrap_or(brush.quantity));
            if let (Some(end_x), Some(end_y)) = (end_x, end_y) {
                spec = spec.with_area(end_x, end_y);
            }

            let index = state.add_placement(&spec)?;
            state.save_active()?;
            println!("Added placement {} to {}", index, map);
        }
    }

    Ok(())
}
