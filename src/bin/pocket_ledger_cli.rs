use pocket_ledger::cli::run_cli;

fn main() {
    pocket_ledger::init();
    if let Err(err) = run_cli() {
        eprintln!("pocket_ledger_cli: {}", err);
        std::process::exit(1);
    }
}
