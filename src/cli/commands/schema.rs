const SCHEMA: &str = include_str!("../../../sql/schema.sql");

pub fn handle() -> anyhow::Result<()> {
    print!("{}", SCHEMA);
    Ok(())
}
