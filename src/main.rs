use boleto_pix::application::converter::BoletoConverter;
use boleto_pix::domain::boleto::{self, BoletoInput};
use boleto_pix::domain::payment::MerchantIdentity;
use boleto_pix::infrastructure::brcode::BrCodeEncoder;
use boleto_pix::infrastructure::clock::SystemClock;
use boleto_pix::interfaces::csv::boleto_reader::BoletoReader;
use boleto_pix::interfaces::csv::conversion_writer::ConversionWriter;
use boleto_pix::interfaces::dto::{ConvertBoletoRequest, DecodedBoleto, run_conversion};
use boleto_pix::interfaces::http::{self, ServeConfig};
use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Convert Brazilian boletos into Pix charges", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a boleto and print its amount and due date
    Decode(SourceArgs),
    /// Build a Pix payload and QR code for one boleto
    Convert {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        identity: IdentityArgs,
        /// Amount to charge instead of the boleto amount
        #[arg(long)]
        amount_override: Option<Decimal>,
        /// Payer name appended to the message
        #[arg(long)]
        payer_name: Option<String>,
        /// Free-text message
        #[arg(long)]
        message: Option<String>,
    },
    /// Convert every boleto listed in a CSV file
    Batch {
        /// Input CSV with linha_digitavel,codigo_barras,amount_override,payer_name,message
        input: PathBuf,
        #[command(flatten)]
        identity: IdentityArgs,
        /// Message used for rows without one
        #[arg(long)]
        default_message: Option<String>,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(long, env = "BOLETO_PIX_BIND", default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
        /// Message used for requests without one
        #[arg(long, env = "BOLETO_PIX_DEFAULT_MESSAGE")]
        default_message: Option<String>,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// 47-digit linha digitavel
    #[arg(long, conflicts_with = "codigo_barras", required_unless_present = "codigo_barras")]
    linha_digitavel: Option<String>,
    /// 44-digit codigo de barras
    #[arg(long)]
    codigo_barras: Option<String>,
}

#[derive(Args)]
struct IdentityArgs {
    /// Pix key of the receiver
    #[arg(long)]
    pix_key: String,
    /// Receiver display name
    #[arg(long)]
    merchant_name: String,
    /// Receiver city
    #[arg(long)]
    merchant_city: String,
}

impl From<IdentityArgs> for MerchantIdentity {
    fn from(args: IdentityArgs) -> Self {
        Self {
            pix_key: args.pix_key,
            merchant_name: args.merchant_name,
            merchant_city: args.merchant_city,
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn converter() -> BoletoConverter {
    BoletoConverter::new(Box::new(BrCodeEncoder::new()), Box::new(SystemClock))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Decode(source) => {
            let parsed = boleto::decode(&BoletoInput {
                linha_digitavel: source.linha_digitavel,
                codigo_barras: source.codigo_barras,
            })
            .into_diagnostic()?;
            let decoded = DecodedBoleto::from(parsed);
            println!(
                "{}",
                serde_json::to_string_pretty(&decoded).into_diagnostic()?
            );
        }
        Command::Convert {
            source,
            identity,
            amount_override,
            payer_name,
            message,
        } => {
            let request = ConvertBoletoRequest {
                linha_digitavel: source.linha_digitavel,
                codigo_barras: source.codigo_barras,
                amount_override,
                pix_key: identity.pix_key,
                merchant_name: identity.merchant_name,
                merchant_city: identity.merchant_city,
                payer_name,
                message,
            };
            let response = run_conversion(&converter(), request, None)
                .await
                .into_diagnostic()?;
            println!(
                "{}",
                serde_json::to_string_pretty(&response).into_diagnostic()?
            );
        }
        Command::Batch {
            input,
            identity,
            default_message,
        } => {
            let identity = MerchantIdentity::from(identity);
            let converter = converter();
            let file = File::open(input).into_diagnostic()?;
            let reader = BoletoReader::new(file);

            let stdout = io::stdout();
            let mut writer = ConversionWriter::new(stdout.lock());

            // Header is line 1
            for (line, record) in reader.records().enumerate().map(|(i, r)| (i + 2, r)) {
                let result = match record {
                    Ok(record) => {
                        run_conversion(
                            &converter,
                            record.into_request(&identity),
                            default_message.as_deref(),
                        )
                        .await
                    }
                    Err(e) => Err(e),
                };
                match result {
                    Ok(response) => writer.write_conversion(&response).into_diagnostic()?,
                    Err(e) => eprintln!("Error converting boleto on line {line}: {e}"),
                }
            }
            writer.flush().into_diagnostic()?;
        }
        Command::Serve {
            bind,
            default_message,
        } => {
            let config = ServeConfig {
                bind,
                default_message,
            };
            http::serve(config, converter()).await.into_diagnostic()?;
        }
    }

    Ok(())
}
