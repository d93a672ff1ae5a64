//! Admin account maintenance.

use anyhow::{bail, Result};
use mercurius_auth::{NewUser, PasswordHasher, Role};
use mercurius_store::{AdminSetup, UserService};
use serde_json::json;

use super::{AdminArgs, AdminCommand};
use crate::context::Context;

/// Run the admin command.
pub fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AdminCommand::Setup => setup(ctx),
        AdminCommand::Passwd { username } => passwd(username, ctx),
        AdminCommand::Hash { password } => hash(password, ctx),
        AdminCommand::Verify { hash, password } => verify(&hash, password, ctx),
    }
}

fn setup(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let admin = &ctx.config.admin;
    let users = UserService::new(&store);

    if let Some(existing) = mercurius_store::UserRepository::find_by_username(&store, &admin.username)? {
        if existing.is_admin() {
            return report(&AdminSetup::Existing(existing), ctx);
        }
    }

    let input = NewUser {
        username: admin.username.clone(),
        email: admin.email.clone(),
        name: admin.name.clone(),
        password: ctx.new_password(&format!("Password for {}", admin.username))?,
        role: Role::Admin,
    };
    let outcome = users.setup_admin(input)?;
    if outcome.created() {
        ctx.save_store(&store)?;
    }
    report(&outcome, ctx)
}

fn report(outcome: &AdminSetup, ctx: &Context) -> Result<()> {
    let user = outcome.user();
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "created": outcome.created(),
            "username": user.username,
            "email": user.email,
            "name": user.name,
            "id": user.id,
        }));
        return Ok(());
    }

    if outcome.created() {
        ctx.output.success("Admin user created");
    } else {
        ctx.output.warn("Admin user already exists");
    }
    ctx.output.kv("Username", &user.username);
    ctx.output.kv("Email", &user.email);
    ctx.output.kv("Name", &user.name);
    if !outcome.created() {
        ctx.output.info("Use `mercurius admin passwd` to reset the password.");
    }
    Ok(())
}

fn passwd(username: Option<String>, ctx: &Context) -> Result<()> {
    let username = username.unwrap_or_else(|| ctx.config.admin.username.clone());
    let store = ctx.open_store()?;
    let password = ctx.new_password(&format!("New password for {}", username))?;
    let user = UserService::new(&store).change_password(&username, &password)?;
    ctx.save_store(&store)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "username": user.username, "updatedAt": user.updated_at }));
        return Ok(());
    }
    ctx.output.success(&format!("Password changed for {}", user.username));
    Ok(())
}

fn hash(password: Option<String>, ctx: &Context) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => ctx.new_password("Password to hash")?,
    };
    let hasher = PasswordHasher::default();
    hasher.validate_password(&password)?;
    let hash = hasher.hash(&password)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "hash": hash }));
    } else {
        println!("{}", hash);
    }
    Ok(())
}

fn verify(hash: &str, password: Option<String>, ctx: &Context) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => ctx.password("Password to check")?,
    };
    let valid = PasswordHasher::default().verify(&password, hash)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "valid": valid }));
        return Ok(());
    }
    if !valid {
        bail!("Password does not match the hash");
    }
    ctx.output.success("Password matches");
    Ok(())
}
