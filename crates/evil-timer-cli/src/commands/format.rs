use clap::Args;
use evil_timer_core::Digits;

#[derive(Args)]
pub struct FormatArgs {
    /// Duration in seconds (fractional allowed)
    #[arg(allow_negative_numbers = true)]
    pub seconds: f64,
    /// Print the digit groups as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: FormatArgs) -> Result<(), Box<dyn std::error::Error>> {
    let digits = Digits::from_secs(args.seconds);
    if args.json {
        let out = serde_json::json!({
            "display": digits.to_string(),
            "digits": digits,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{digits}");
    }
    Ok(())
}
