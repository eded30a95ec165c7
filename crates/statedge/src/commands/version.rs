pub fn run() -> anyhow::Result<()> {
    println!("statedge {}", env!("CARGO_PKG_VERSION"));
    println!("Embedded-context navigation resolver for the StatEdge access button");
    Ok(())
}
