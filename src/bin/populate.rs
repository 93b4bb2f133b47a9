// src/bin/populate.rs
// Registers the demo account (John Doe) against a running server.
// An existing account with the same email is deleted first using an admin token.

use anyhow::{bail, Context, Result};
use dotenv::dotenv;
use reqwest::{Client, StatusCode};
use std::env;
use std::process;
use std::time::Duration;

use hbnb::models::{CreateUserRequest, LoginRequest, TokenResponse, UserResponse};

// --- ANSI colors for the terminal ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

const DEMO_EMAIL: &str = "johndoe@test.com";
const DEMO_PASSWORD: &str = "johndoe1234";

struct Populator {
    base_url: String,
    client: Client,
}

impl Populator {
    fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { base_url, client })
    }

    fn api(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    async fn check_service_health(&self) -> bool {
        match self.client.get(format!("{}/health", self.base_url)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn login(&self, email: &str, password: &str) -> Result<String> {
        let response = self
            .client
            .post(self.api("/auth/login"))
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            bail!("login as {} failed with HTTP {}", email, response.status());
        }
        Ok(response.json::<TokenResponse>().await?.access_token)
    }

    async fn find_user(&self, email: &str) -> Result<Option<UserResponse>> {
        let users: Vec<UserResponse> = self
            .client
            .get(self.api("/users/"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    async fn delete_user(&self, token: &str, user: &UserResponse) -> Result<()> {
        let response = self
            .client
            .delete(self.api(&format!("/users/{}", user.id)))
            .bearer_auth(token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::FORBIDDEN => bail!("admin token was refused"),
            status => bail!("delete failed with HTTP {}", status),
        }
    }

    async fn create_demo_user(&self) -> Result<UserResponse> {
        let payload = CreateUserRequest {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: DEMO_EMAIL.to_string(),
            password: DEMO_PASSWORD.to_string(),
            is_admin: false,
        };
        let response = self.client.post(self.api("/users/")).json(&payload).send().await?;

        if response.status() != StatusCode::CREATED {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            bail!("HTTP {} - {}", status, body);
        }
        Ok(response.json().await?)
    }

    async fn run(&self, admin_email: &str, admin_password: &str) -> Result<()> {
        if let Some(existing) = self.find_user(DEMO_EMAIL).await? {
            println!(
                "{}⚠️  {} already exists, recreating it...{}",
                YELLOW, DEMO_EMAIL, RESET
            );
            let token = self
                .login(admin_email, admin_password)
                .await
                .context("admin login is required to replace the demo account")?;
            self.delete_user(&token, &existing).await?;
            println!("{}✅ Previous account removed{}", GREEN, RESET);
        }

        let user = self.create_demo_user().await?;
        println!("\n{}✨ Demo user ready{}", GREEN, RESET);
        println!("  • ID: {}", user.id);
        println!("  • Name: {} {}", user.first_name, user.last_name);
        println!("  • Email: {}", user.email);
        println!("  • Admin: {}", user.is_admin);
        println!("\n{}Log in with:{}", BOLD, RESET);
        println!("  Email: {}", DEMO_EMAIL);
        println!("  Password: {}", DEMO_PASSWORD);
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let base_url = env::var("HBNB_API_URL").unwrap_or_else(|_| "http://127.0.0.1:5001".to_string());
    let admin_email = env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@hbnb.com".to_string());
    let admin_password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "adminpassword".to_string());

    let populator = match Populator::new(base_url) {
        Ok(p) => p,
        Err(e) => {
            println!("{}❌ {:#}{}", RED, e, RESET);
            process::exit(1);
        }
    };

    println!("\n{}🔍 Checking service status...{}", CYAN, RESET);
    if !populator.check_service_health().await {
        println!("{}❌ Service unavailable.{}", RED, RESET);
        println!("{}Please ensure the API is running (cargo run --bin hbnb){}", YELLOW, RESET);
        process::exit(1);
    }
    println!("{}✅ Service available{}", GREEN, RESET);

    if let Err(e) = populator.run(&admin_email, &admin_password).await {
        println!("{}❌ Could not create the demo user: {:#}{}", RED, e, RESET);
        process::exit(1);
    }
}
