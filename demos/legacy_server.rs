use mcstat::{Conf, StatErr};
use std::time::Duration;

fn main() -> Result<(), StatErr> {
    env_logger::init();

    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "localhost:25565".into());
    let server = Conf::create_from_str(&addr)?.with_timeout(Duration::from_secs(5));

    match server.get_extended_legacy_server_status() {
        Ok(info) => println!("1.6: {}", info),
        Err(err) => eprintln!("1.6 ping failed: {}", err),
    }

    match server.get_legacy_server_status() {
        Ok(info) => println!("1.4: {}", info),
        Err(err) => eprintln!("1.4 ping failed: {}", err),
    }

    let info = server.get_ancient_server_status()?;
    println!("beta: {}", info);

    Ok(())
}
