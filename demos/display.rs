use std::env;
use std::thread;
use std::time::Duration;

use totp_engine::{Algorithm, Secret, TOTP};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let encoded = env::args()
        .nth(1)
        .unwrap_or_else(|| "CH4772YYRSD7O5E7KQRZMHNRRRLSASCW".to_string());
    let secret = Secret::Encoded(encoded);
    let totp = TOTP::new(Algorithm::SHA1, 6, 1, 30, secret.to_bytes()?)?;

    loop {
        println!(
            "code {}\t ttl {}\t valid until: {}",
            totp.generate_current()?,
            totp.ttl()?,
            totp.next_step_current()?
        );
        thread::sleep(Duration::from_secs(1));
    }
}
