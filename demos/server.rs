use mcstat::{Conf, StatErr};
use std::time::Duration;

fn main() -> Result<(), StatErr> {
    env_logger::init();

    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "localhost:25565".into());
    let server = Conf::create_from_str(&addr)?.with_timeout(Duration::from_secs(5));

    let info = server.get_server_status()?;
    println!("{}", info);
    println!("motd: {}", info.description_text());

    let latency = server.get_server_latency()?;
    println!("latency: {} ms", latency.as_millis());

    Ok(())
}
