use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = arca_api::Args::parse();
	arca_api::run(args).await
}
