use evil_timer_core::Mode;
use serde::Serialize;

#[derive(Serialize)]
struct ModeInfo {
    name: Mode,
    label: &'static str,
    multiplier: f64,
    phrases: &'static [&'static str],
}

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let modes: Vec<ModeInfo> = Mode::ALL
        .iter()
        .map(|&mode| {
            let profile = mode.profile();
            ModeInfo {
                name: mode,
                label: mode.label(),
                multiplier: profile.multiplier,
                phrases: profile.phrases,
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&modes)?);
        return Ok(());
    }

    for info in &modes {
        println!("{:<8} x{:.10}  {} phrase(s)", info.name, info.multiplier, info.phrases.len());
        for phrase in info.phrases {
            println!("    - {phrase}");
        }
    }
    Ok(())
}
