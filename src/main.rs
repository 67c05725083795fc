use std::process::ExitCode;

fn main() -> ExitCode {
    match contrib_heatmap::app::run() {
        Ok(path) => {
            println!("Wrote {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
