//! Tours CLI
//!
//! Command-line interface for the Tour Ratings API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use tours_client::ToursClient;
use tours_types::{CreateTourRequest, CustomerId, Difficulty, RatingId, Region, TourId};

#[derive(Parser)]
#[command(name = "tours")]
#[command(author, version, about = "Tour Ratings API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Tour Ratings API
    #[arg(long, env = "TOURS_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tour catalog operations
    Tour {
        #[command(subcommand)]
        action: TourCommands,
    },
    /// Rating operations
    Rating {
        #[command(subcommand)]
        action: RatingCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum TourCommands {
    /// Add a tour to the catalog
    Create {
        /// Tour title
        title: String,
        #[arg(long)]
        price: i64,
        #[arg(long)]
        package_code: String,
        /// Easy, Medium, Difficult or Varies
        #[arg(long, default_value = "Varies")]
        difficulty: String,
        /// Central Coast, Southern California, Northern California or Varies
        #[arg(long, default_value = "Varies")]
        region: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        duration: String,
    },
    /// Get tour details
    Get { id: i64 },
    /// List all tours
    List,
}

#[derive(Subcommand)]
enum RatingCommands {
    /// List every rating of every tour
    List,
    /// Get a rating by its internal ID
    Get { id: i64 },
    /// List the ratings of one tour
    ForTour {
        #[arg(long)]
        tour: i64,
    },
    /// Rate a tour on behalf of a customer
    Create {
        #[arg(long)]
        tour: i64,
        #[arg(long)]
        customer: i64,
        #[arg(long)]
        score: i32,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Give one score for several customers (all or nothing)
    Batch {
        #[arg(long)]
        tour: i64,
        #[arg(long)]
        score: i32,
        /// Customer IDs (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        customers: Vec<i64>,
    },
    /// Replace score and comment of a rating
    Update {
        #[arg(long)]
        tour: i64,
        #[arg(long)]
        customer: i64,
        #[arg(long)]
        score: i32,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Change only the given fields of a rating
    Patch {
        #[arg(long)]
        tour: i64,
        #[arg(long)]
        customer: i64,
        #[arg(long)]
        score: Option<i32>,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Delete a customer's rating of a tour
    Delete {
        #[arg(long)]
        tour: i64,
        #[arg(long)]
        customer: i64,
    },
    /// Average score of a tour
    Average {
        #[arg(long)]
        tour: i64,
    },
}

fn parse_difficulty(s: &str) -> Result<Difficulty> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Unknown difficulty: {}. Supported: Easy, Medium, Difficult, Varies", s))
}

fn parse_region(s: &str) -> Result<Region> {
    Region::find_by_label(s).map_err(|_| {
        anyhow::anyhow!(
            "Unknown region: {}. Supported: Central Coast, Southern California, Northern California, Varies",
            s
        )
    })
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = ToursClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Tour { action } => match action {
            TourCommands::Create {
                title,
                price,
                package_code,
                difficulty,
                region,
                description,
                duration,
            } => {
                let req = CreateTourRequest {
                    title,
                    description,
                    price,
                    duration,
                    package_code,
                    difficulty: parse_difficulty(&difficulty)?,
                    region: parse_region(&region)?,
                };
                print_json(&client.create_tour(&req).await?)?;
            }
            TourCommands::Get { id } => print_json(&client.get_tour(TourId(id)).await?)?,
            TourCommands::List => print_json(&client.list_tours().await?)?,
        },

        Commands::Rating { action } => match action {
            RatingCommands::List => print_json(&client.list_ratings().await?)?,
            RatingCommands::Get { id } => print_json(&client.get_rating(RatingId(id)).await?)?,
            RatingCommands::ForTour { tour } => {
                print_json(&client.ratings_for_tour(TourId(tour)).await?)?
            }
            RatingCommands::Create {
                tour,
                customer,
                score,
                comment,
            } => {
                let rating = client
                    .create_rating(TourId(tour), CustomerId(customer), score, comment)
                    .await?;
                print_json(&rating)?;
            }
            RatingCommands::Batch {
                tour,
                score,
                customers,
            } => {
                let customers = customers.into_iter().map(CustomerId).collect();
                let created = client.rate_many(TourId(tour), score, customers).await?;
                println!("✓ {} ratings created", created);
            }
            RatingCommands::Update {
                tour,
                customer,
                score,
                comment,
            } => {
                let rating = client
                    .update_rating(TourId(tour), CustomerId(customer), score, comment)
                    .await?;
                print_json(&rating)?;
            }
            RatingCommands::Patch {
                tour,
                customer,
                score,
                comment,
            } => {
                if score.is_none() && comment.is_none() {
                    anyhow::bail!("Nothing to change: pass --score and/or --comment");
                }
                let rating = client
                    .patch_rating(TourId(tour), CustomerId(customer), score, comment)
                    .await?;
                print_json(&rating)?;
            }
            RatingCommands::Delete { tour, customer } => {
                client
                    .delete_rating(TourId(tour), CustomerId(customer))
                    .await?;
                println!("✓ Rating deleted");
            }
            RatingCommands::Average { tour } => {
                let average = client.average_score(TourId(tour)).await?;
                println!("{:.2}", average);
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_batch_customers() {
        let cli = Cli::try_parse_from([
            "tours", "rating", "batch", "--tour", "1", "--score", "5", "--customers", "100,101,102",
        ])
        .unwrap();

        match cli.command {
            Commands::Rating {
                action: RatingCommands::Batch { customers, .. },
            } => assert_eq!(customers, vec![100, 101, 102]),
            _ => panic!("expected rating batch"),
        }
    }

    #[test]
    fn test_parse_region_label() {
        assert_eq!(
            parse_region("Southern California").unwrap(),
            Region::SouthernCalifornia
        );
        assert!(parse_region("Nevada").is_err());
        assert_eq!(parse_difficulty("Easy").unwrap(), Difficulty::Easy);
    }
}
