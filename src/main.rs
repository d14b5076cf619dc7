use clap::{Parser, Subcommand};
use present_checker::{
    config::{CheckerKind, Settings},
    flow::CheckEngine,
    follow,
    leaderboard::{FileStore, LeaderboardStore},
    models::{PresentCheckError, RewardTier},
    reward::RewardGenerator,
};
use tracing::{error, info};

mod tui_main;

#[derive(Parser)]
#[clap(name = "present-checker")]
#[clap(about = "How many X presents do you get?", long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a follow check and draw presents for a handle
    Check {
        /// Handle to check (leading @ is fine)
        #[clap(short = 'u', long)]
        handle: String,

        /// Override the configured checker (api, proxy, manual)
        #[clap(short, long)]
        checker: Option<String>,
    },

    /// Print the stored leaderboard
    Leaderboard,

    /// Draw repeatedly and print the tier distribution
    Simulate {
        /// Number of draws
        #[clap(short, long, default_value = "100000")]
        draws: u64,
    },

    /// Launch interactive TUI
    Tui,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; the TUI installs its own silent subscriber to
    // keep the alternate screen clean.
    if !matches!(cli.command, Commands::Tui) {
        tracing_subscriber::fmt::init();
    }

    // Load configuration
    let mut settings = Settings::new().unwrap_or_else(|_| {
        info!("Using default settings");
        Settings::default()
    });

    match cli.command {
        Commands::Check { handle, checker } => {
            if let Some(kind) = checker {
                settings.checker.kind = CheckerKind::from_str(&kind)
                    .ok_or_else(|| anyhow::anyhow!("Invalid checker: {}", kind))?;
            }
            if let Err(e) = settings.validate() {
                error!("Invalid settings: {}", e);
                return Err(anyhow::anyhow!(e));
            }

            let checker = follow::build_checker(&settings)?;
            let store = LeaderboardStore::load(
                Box::new(FileStore::new(&settings.leaderboard.path)),
                settings.leaderboard.key.clone(),
            );
            let engine = CheckEngine::new(
                checker,
                RewardGenerator::from_entropy(),
                store,
                settings.target.handle.clone(),
            );

            match engine.run_check(&handle).await {
                Ok(outcome) => {
                    println!("\n=== Present Check Results ===");
                    println!("Handle: @{}", outcome.result.handle);
                    println!("Presents: {}", outcome.result.reward);
                    println!("{}", outcome.tier.message());
                    println!("\nLeaderboard:");
                    for (i, entry) in outcome.leaderboard.iter().enumerate() {
                        println!("{:>3}. @{:<18} {:>8}", i + 1, entry.handle, entry.reward);
                    }
                }
                Err(e) => {
                    error!("Check failed: {}", e);
                    println!("\n{}", e.user_message(&settings.target.handle));
                    if matches!(e, PresentCheckError::NotFollowing { .. }) {
                        println!("Follow here: {}", settings.target.profile_url);
                    }
                }
            }
        }

        Commands::Leaderboard => {
            let store = LeaderboardStore::load(
                Box::new(FileStore::new(&settings.leaderboard.path)),
                settings.leaderboard.key.clone(),
            );
            if store.is_empty() {
                println!("No checks recorded yet.");
            } else {
                println!("=== Leaderboard ===");
                for (i, entry) in store.entries().iter().enumerate() {
                    println!(
                        "{:>3}. @{:<18} {:>8} presents   {}",
                        i + 1,
                        entry.handle,
                        entry.reward,
                        entry.timestamp.format("%Y-%m-%d %H:%M")
                    );
                }
            }
        }

        Commands::Simulate { draws } => {
            if draws == 0 {
                return Err(anyhow::anyhow!("draws must be positive"));
            }
            let mut generator = RewardGenerator::from_entropy();
            let mut counts = [0u64; 10];
            let mut max_reward = 0u64;
            for _ in 0..draws {
                let reward = generator.draw();
                counts[RewardTier::from_reward(reward).rank() as usize] += 1;
                max_reward = max_reward.max(reward);
            }

            println!("=== Tier distribution over {} draws ===", draws);
            let tiers = [
                RewardTier::Legendary,
                RewardTier::Impossible,
                RewardTier::UltraRare,
                RewardTier::Epic,
                RewardTier::Amazing,
                RewardTier::Wonderful,
                RewardTier::PrettyGood,
                RewardTier::NotBad,
                RewardTier::Consolation,
                RewardTier::Naughty,
            ];
            for tier in tiers {
                let count = counts[tier.rank() as usize];
                println!(
                    "{:<12} {:>10}  ({:.4}%)",
                    format!("{:?}", tier),
                    count,
                    count as f64 * 100.0 / draws as f64
                );
            }
            println!("Max reward drawn: {}", max_reward);
        }

        Commands::Tui => {
            if let Err(e) = settings.validate() {
                error!("Invalid settings: {}", e);
                return Err(anyhow::anyhow!(e));
            }
            tui_main::run_tui(settings).await?;
        }
    }

    Ok(())
}
