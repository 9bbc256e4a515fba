use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dashboard_core::{
    load_settings, submit_order, submit_product, submit_user, ApiClient, OrderForm, ProductForm,
    RefreshOrchestrator, SubmitOutcome, UserForm,
};
use tokio::sync::broadcast::error::RecvError;

mod render;

#[derive(Parser, Debug)]
#[command(name = "console", about = "Terminal admin console for the commerce backend")]
struct Args {
    /// Overrides the configured API base URL.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check backend health.
    Status,
    /// Fetch everything once and print the tables.
    Show,
    /// Poll the backend periodically and re-render on every cycle.
    Watch {
        /// Seconds between refresh cycles; defaults to the configured value.
        #[arg(long)]
        interval_secs: Option<u64>,
    },
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand, Debug)]
enum UserAction {
    /// Create a user.
    Add {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
    },
}

#[derive(Subcommand, Debug)]
enum ProductAction {
    /// Create a product.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        stock_quantity: String,
    },
}

#[derive(Subcommand, Debug)]
enum OrderAction {
    /// Create an order with a single line item.
    Add {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        product_id: String,
        #[arg(long)]
        quantity: String,
    },
}

fn report_submission(outcome: SubmitOutcome, success_message: &str) {
    match outcome {
        SubmitOutcome::Accepted => println!("{success_message}"),
        SubmitOutcome::Rejected(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(url) = args.server_url {
        settings.api_base_url = url;
    }

    let api = ApiClient::new(settings.api_base_url.clone());
    let orchestrator = RefreshOrchestrator::new(api.clone());

    match args.command {
        Command::Status => match api.health().await {
            Ok(health) if health.is_healthy() => {
                println!("API Connected ({})", settings.api_base_url);
            }
            Ok(health) => {
                println!("API Disconnected (status: {})", health.status);
                std::process::exit(1);
            }
            Err(err) => {
                tracing::error!(error = %err, "health check failed");
                println!("API Disconnected");
                std::process::exit(1);
            }
        },
        Command::Show => {
            orchestrator.refresh_all().await;
            print!("{}", render::render_dashboard(&orchestrator.snapshot().await));
        }
        Command::Watch { interval_secs } => {
            let interval =
                Duration::from_secs(interval_secs.unwrap_or(settings.refresh_interval_secs));
            match api.health().await {
                Ok(health) if health.is_healthy() => println!("API Connected"),
                _ => println!("API Disconnected"),
            }

            orchestrator.refresh_all().await;
            print!("{}", render::render_dashboard(&orchestrator.snapshot().await));

            orchestrator.start_periodic(interval).await;
            let mut events = orchestrator.subscribe_events();
            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        orchestrator.stop_periodic().await;
                        break;
                    }
                    event = events.recv() => match event {
                        Ok(_) => {
                            println!(
                                "refreshed at {}",
                                chrono::Local::now().format("%H:%M:%S")
                            );
                            print!(
                                "{}",
                                render::render_dashboard(&orchestrator.snapshot().await)
                            );
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "render loop lagged behind refresh events");
                        }
                        Err(RecvError::Closed) => break,
                    },
                }
            }
        }
        Command::Users {
            action: UserAction::Add { username, email },
        } => {
            let outcome = submit_user(&orchestrator, UserForm { username, email }).await;
            report_submission(outcome, "User added successfully!");
        }
        Command::Products {
            action:
                ProductAction::Add {
                    name,
                    description,
                    price,
                    stock_quantity,
                },
        } => {
            let outcome = submit_product(
                &orchestrator,
                ProductForm {
                    name,
                    description,
                    price,
                    stock_quantity,
                },
            )
            .await;
            report_submission(outcome, "Product added successfully!");
        }
        Command::Orders {
            action:
                OrderAction::Add {
                    user_id,
                    product_id,
                    quantity,
                },
        } => {
            let outcome = submit_order(
                &orchestrator,
                OrderForm {
                    user_id,
                    product_id,
                    quantity,
                },
            )
            .await;
            report_submission(outcome, "Order created successfully!");
        }
    }

    Ok(())
}
