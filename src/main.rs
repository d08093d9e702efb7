//! Command-line entry for the bullet designer library

fn main() {
    println!("Bullet Designer v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Parametric bullet profile, dimension and ballistics engine.");
    println!("The library is meant to be embedded; the bundled CLI drives it directly.");
    println!();
    println!("Command-line tool:");
    println!("  bullet-cli profile     Emit the axial profile of a design");
    println!("  bullet-cli solve       Solve length and boat-tail from a target weight");
    println!("  bullet-cli analyze     Sectional density, BC, stability and twist");
    println!("  bullet-cli trajectory  Sampled trajectory with transonic markers");
    println!("  bullet-cli materials   List the material table");
    println!();
    println!("To use as a Rust library:");
    println!("  Add to Cargo.toml: bullet-designer = \"0.1\"");
}
