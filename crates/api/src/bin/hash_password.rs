//! Print an Argon2id hash for `ADMIN_PASSWORD_HASH` / `KITCHEN_PASSWORD_HASH`.
//!
//! ```text
//! hash-password <password>
//! ```

use anyhow::{anyhow, bail};
use cafe_api::auth::password::{hash_password, validate_password_strength};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let (Some(password), None) = (args.next(), args.next()) else {
        bail!("usage: hash-password <password>");
    };

    validate_password_strength(&password).map_err(|msg| anyhow!(msg))?;
    let hash = hash_password(&password).map_err(|e| anyhow!("hashing failed: {e}"))?;
    println!("{hash}");
    Ok(())
}
