//! Reassign premium flags per category group and rewrite wallpapers.json canonically.
//! Run: cargo run --bin truefalse -- --root <catalog> [--ratio 0.2] [--min-true 1] [--dry-run]

fn main() {
    let args: Vec<String> = std::env::args().collect();
    std::process::exit(wallpaper_catalog::cli::run_truefalse_with_args(&args));
}
