use anyhow::Result;

use crate::api::ApiClient;

pub async fn login(api: &mut ApiClient, email: &str, password: &str) -> Result<()> {
    let expires_at = api.login(email, password).await?;
    println!("Logged in as {} until {}", email, expires_at.format("%Y-%m-%d %H:%M UTC"));
    Ok(())
}

pub fn logout(api: &mut ApiClient) -> Result<()> {
    api.logout()?;
    println!("Logged out");
    Ok(())
}
