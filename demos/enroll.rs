use totp_engine::{Algorithm, OtpAuth, Secret, TOTP};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let secret = Secret::generate_secret()?;

    let totp = TOTP::new(Algorithm::SHA1, 6, 1, 30, secret.to_bytes()?)?;
    let enrollment = OtpAuth::new(
        totp,
        Some("AppName".to_string()),
        "example@example.com".to_string(),
    )?;

    println!("secret: {}", secret);
    println!("uri: {}", enrollment.get_url());
    println!("code: {}", enrollment.totp.generate_current()?);
    Ok(())
}
