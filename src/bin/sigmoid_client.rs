use clap::{Parser, Subcommand};
use sigmoid_api::client::{export, format_table, DEFAULT_BASE_URL};
use sigmoid_api::core::service::SampleRequest;
use sigmoid_api::utils::logger;
use sigmoid_api::SigmoidClient;

#[derive(Parser)]
#[command(name = "sigmoid-client")]
#[command(about = "Command-line client for the sigmoid API")]
struct Args {
    /// Base URL of a running sigmoid-api server
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    url: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sample a curve and store its parameters
    Calculate {
        #[arg(long, allow_hyphen_values = true)]
        x_shift: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        steepness: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        x_range_start: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        x_range_end: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        num_points: Option<i64>,
        /// Also write the sampled points to this CSV file
        #[arg(long)]
        csv: Option<String>,
    },
    /// Replay stored parameters over [-10, 10]
    Data {
        id: u64,
        #[arg(long)]
        csv: Option<String>,
    },
    /// Run the nonlinear separability demo
    Demo {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List stored parameters, newest first
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let client = SigmoidClient::new(&args.url)?;

    let outcome = run(&client, args.command).await;
    if let Err(e) = &outcome {
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(if e.is_client_error() { 2 } else { 1 });
    }

    Ok(())
}

async fn run(client: &SigmoidClient, command: Command) -> sigmoid_api::Result<()> {
    match command {
        Command::Calculate {
            x_shift,
            steepness,
            x_range_start,
            x_range_end,
            num_points,
            csv,
        } => {
            let request = SampleRequest {
                x_shift,
                steepness,
                x_range_start,
                x_range_end,
                num_points,
            };
            let result = client.calculate(&request).await?;
            let params = &result.parameters;

            println!(
                "✅ Parameters #{}: x_shift = {}, steepness = {}, x range = [{}, {}], points = {}",
                params.id,
                params.x_shift,
                params.steepness,
                params.x_range[0],
                params.x_range[1],
                params.num_points
            );
            println!("{}", format_table(&result.data));

            if let Some(path) = csv {
                export::export_points_csv(&path, &result.data)?;
                println!("📁 Points saved to: {}", path);
            }
        }
        Command::Data { id, csv } => {
            let curve = client.sigmoid_data(id).await?;
            let params = &curve.parameters;
            println!(
                "📋 Parameters #{}: x_shift = {}, steepness = {}, created at {}",
                params.id, params.x_shift, params.steepness, params.created_at
            );
            println!("{}", format_table(&curve.data));

            if let Some(path) = csv {
                export::export_points_csv(&path, &curve.data)?;
                println!("📁 Points saved to: {}", path);
            }
        }
        Command::Demo { seed } => {
            let demo = client.demonstrate(seed).await?;
            let report = &demo.report;
            println!("🔵 Classification results (seed {})", report.seed);
            println!("  Accuracy: {:.1}%", report.accuracy * 100.0);
            println!("  Decision boundary: r = {}", report.decision_boundary);
            println!("  Sigmoid steepness: {}", report.steepness);
            println!("  Points: {}", report.points.len());
            println!("  {}", demo.explanation);
        }
        Command::List => {
            let records = client.list_parameters().await?;
            if records.is_empty() {
                println!("No stored parameters");
            }
            for record in records {
                println!("#{:<5} {}  ({})", record.id, record, record.created_at);
            }
        }
    }

    Ok(())
}
