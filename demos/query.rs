use mcstat::{Conf, StatErr};
use std::time::Duration;

fn main() -> Result<(), StatErr> {
    env_logger::init();

    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "localhost:25565".into());
    let server = Conf::create_from_str(&addr)?.with_timeout(Duration::from_secs(5));

    println!("{}", server.query()?);
    println!("{}", server.query_full()?);

    Ok(())
}
