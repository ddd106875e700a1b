//! `pbtrack` - CLI for pbtracker
//!
//! This binary provides the command-line interface for managing the speedrun
//! catalog and running the time calculators.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{debug, info};

use pbtracker::cli::{
    CalcCommand, CategoryCommand, Cli, Command, ConfigCommand, GameCommand, SettingsCommand,
};
use pbtracker::model::{Game, Section};
use pbtracker::reminder::upcoming_reminders;
use pbtracker::timecalc::{self, format_time, next_person_to_beat, parse_time};
use pbtracker::{backup, init_logging, Config, RecordStore, Stats, Storage};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    if !cli.command.needs_storage() {
        return match cli.command {
            Command::Calc(cmd) => {
                handle_calc(cmd);
                Ok(())
            }
            Command::Config(cmd) => handle_config(&config, cmd),
            _ => Ok(()),
        };
    }

    let db_path = config.database_path();
    debug!("Opening database at {}", db_path.display());
    let mut storage = Storage::open(&db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;

    match cli.command {
        Command::Game(cmd) => handle_game(&storage, cmd),
        Command::Category(cmd) => handle_category(&storage, cmd),
        Command::Stats(cmd) => handle_stats(&storage, &config, cmd.json),
        Command::Reminders(cmd) => handle_reminders(&storage, &config, cmd.json),
        Command::Export(cmd) => {
            let json = backup::export_data(&storage)?;
            match cmd.output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Exported to {}", path.display());
                }
                None => println!("{json}"),
            }
            Ok(())
        }
        Command::Import(cmd) => {
            let json = std::fs::read_to_string(&cmd.file)
                .with_context(|| format!("failed to read {}", cmd.file.display()))?;
            let summary = backup::import_data(&mut storage, &json)
                .with_context(|| format!("failed to import {}", cmd.file.display()))?;
            match summary.games_imported {
                Some(n) => println!("Imported {n} games."),
                None => println!("No games in backup; collection unchanged."),
            }
            if summary.settings_imported {
                println!("Settings replaced.");
            }
            Ok(())
        }
        Command::Settings(cmd) => handle_settings(&mut storage, cmd),
        Command::Calc(_) | Command::Config(_) => Ok(()),
    }
}

fn handle_calc(cmd: CalcCommand) {
    match cmd {
        CalcCommand::Parse { time } => println!("{}", parse_time(&time)),
        CalcCommand::Format { seconds } => println!("{}", format_time(seconds)),
        CalcCommand::Diff { pb, target } => {
            println!("{}", timecalc::time_difference(&pb, &target));
        }
        CalcCommand::Next { placement } => println!("{}", next_person_to_beat(placement)),
    }
}

fn handle_game(storage: &Storage, cmd: GameCommand) -> Result<()> {
    match cmd {
        GameCommand::Add {
            title,
            section,
            image,
            tags,
            favorite,
        } => {
            let mut game = Game::new(title, Section::from(section));
            game.image = image;
            game.tags = tags;
            game.is_favorite = favorite;
            let id = storage.add_game(game)?;
            info!("Added game {}", id);
            println!("Added game {id}.");
        }
        GameCommand::List { json } => {
            let games = storage.games()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&games)?);
            } else if games.is_empty() {
                println!("No games yet. Add one with `pbtrack game add <TITLE>`.");
            } else {
                for game in &games {
                    println!(
                        "{:>4}  {:<30} {:<11} {} categories{}",
                        game.id.unwrap_or_default(),
                        game.title,
                        game.section,
                        game.categories.len(),
                        if game.is_favorite { "  *" } else { "" }
                    );
                }
            }
        }
        GameCommand::Show { id, json } => {
            let game = storage
                .get_game(id)?
                .ok_or(pbtracker::Error::GameNotFound { id })?;
            if json {
                println!("{}", serde_json::to_string_pretty(&game)?);
            } else {
                print_game(&game);
            }
        }
        GameCommand::Update(args) => {
            let id = args.id;
            let game = storage.update_game(id, args.into())?;
            println!("Updated game {id}: {}", game.title);
        }
        GameCommand::Remove { id } => {
            if storage.delete_game(id)? {
                println!("Removed game {id}.");
            } else {
                println!("No game with id {id}.");
            }
        }
    }
    Ok(())
}

fn print_game(game: &Game) {
    println!("{} (#{})", game.title, game.id.unwrap_or_default());
    println!("Section: {}", game.section);
    if !game.tags.is_empty() {
        println!("Tags:    {}", game.tags.join(", "));
    }
    println!();
    for category in &game.categories {
        println!(
            "  [{}] {:<20} PB {:<10} {}{}",
            category.id,
            category.name,
            category.pb_time,
            category.next_person_to_beat,
            if category.is_favorite { "  *" } else { "" }
        );
        if !category.time_to_beat.is_empty() {
            println!(
                "       to beat {} ({})",
                category.time_to_beat, category.time_difference
            );
        }
        if let Some(eligible) = &category.next_run_eligible {
            println!("       eligible {eligible}");
        }
    }
}

fn handle_category(storage: &Storage, cmd: CategoryCommand) -> Result<()> {
    match cmd {
        CategoryCommand::Add(args) => {
            let id = storage.add_category(args.game_id, args.to_category())?;
            println!("Added category {id} to game {}.", args.game_id);
        }
        CategoryCommand::Update(args) => {
            let (game_id, category_id) = (args.game_id, args.category_id);
            let category = storage.update_category(game_id, category_id, args.into())?;
            println!(
                "Updated {}: PB {}, {}",
                category.name, category.pb_time, category.next_person_to_beat
            );
        }
        CategoryCommand::Remove {
            game_id,
            category_id,
        } => {
            if storage.remove_category(game_id, category_id)? {
                println!("Removed category {category_id} from game {game_id}.");
            } else {
                println!("No category {category_id} in game {game_id}.");
            }
        }
    }
    Ok(())
}

fn handle_stats(storage: &Storage, config: &Config, json: bool) -> Result<()> {
    let stats = Stats::compute(&storage.games()?, Utc::now(), &config.stats);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("pbtrack stats");
    println!("-------------");
    println!("Games:         {}", stats.total_games);
    println!("Categories:    {}", stats.total_categories);
    println!("World records: {}", stats.first_places);
    println!("Top 3:         {}", stats.top_three);
    println!(
        "Recent runs:   {} (last {} days)",
        stats.recent_runs, config.stats.recent_window_days
    );
    println!();
    for count in &stats.sections {
        println!("  {:<11} {}", count.section.as_str(), count.games);
    }
    if !stats.most_active.is_empty() {
        println!();
        println!("Most active:");
        for game in &stats.most_active {
            println!("  {:<30} {}", game.title, game.categories);
        }
    }
    if !stats.next_eligible.is_empty() {
        println!();
        println!("Next eligible:");
        for run in &stats.next_eligible {
            println!(
                "  {} {} - {}{}",
                run.eligible_at.format("%Y-%m-%d"),
                run.game_title,
                run.category,
                if run.overdue { " (now)" } else { "" }
            );
        }
    }
    Ok(())
}

fn handle_reminders(storage: &Storage, config: &Config, json: bool) -> Result<()> {
    let settings = storage.settings()?;
    if !settings.notifications_enabled {
        info!("Notifications are disabled in settings");
    }

    let reminders = upcoming_reminders(&storage.games()?, Utc::now(), config.reminder_lead_time());

    if json {
        println!("{}", serde_json::to_string_pretty(&reminders)?);
    } else if reminders.is_empty() {
        println!("No upcoming reminders.");
    } else {
        for reminder in &reminders {
            println!("{}  {}", reminder.at.format("%Y-%m-%d %H:%M"), reminder.body);
        }
    }
    Ok(())
}

fn handle_settings(storage: &mut Storage, cmd: SettingsCommand) -> Result<()> {
    match cmd {
        SettingsCommand::Show { json } => {
            let settings = storage.settings()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            } else {
                println!("Dark mode:          {}", settings.dark_mode);
                println!("Default game image: {}", settings.default_game_image);
                println!("Notifications:      {}", settings.notifications_enabled);
                println!("Tag presets:        {}", settings.tag_presets.join(", "));
            }
        }
        SettingsCommand::Set {
            dark_mode,
            default_image,
            notifications,
            add_tags,
            remove_tags,
        } => {
            let mut settings = storage.settings()?;
            if let Some(dark) = dark_mode {
                settings.dark_mode = dark;
            }
            if let Some(image) = default_image {
                settings.default_game_image = image;
            }
            if let Some(enabled) = notifications {
                settings.notifications_enabled = enabled;
            }
            for tag in add_tags {
                if !settings.tag_presets.contains(&tag) {
                    settings.tag_presets.push(tag);
                }
            }
            settings.tag_presets.retain(|t| !remove_tags.contains(t));
            storage.save_settings(&settings)?;
            println!("Settings saved.");
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Reminders]");
                println!("  Lead time (hours):  {}", config.reminders.lead_time_hours);
                println!();
                println!("[Stats]");
                println!("  Recent window:      {}", config.stats.recent_window_days);
                println!("  Upcoming limit:     {}", config.stats.upcoming_limit);
                println!("  Most active limit:  {}", config.stats.most_active_limit);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
