//! Validate every categories.json / wallpapers.json under a root and mirror
//! invalid folders into <root>/@@error.
//! Run: cargo run --bin check -- --root <catalog>

fn main() {
    let args: Vec<String> = std::env::args().collect();
    std::process::exit(wallpaper_catalog::cli::run_check_with_args(&args));
}
