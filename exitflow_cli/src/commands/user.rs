use anyhow::Result;

use crate::{config::Config, user_store::UserStore};

pub fn create(config: &Config, id: &str, name: &str, department: &str, role: &str) -> Result<()> {
    let actor = UserStore::open(config).create_user(id, name, department, role)?;
    println!("Created user: {}", actor.id);
    Ok(())
}

pub fn list(config: &Config) -> Result<()> {
    let users = UserStore::open(config).list_users()?;

    if users.is_empty() {
        println!("No users registered.");
        return Ok(());
    }

    println!("Users ({}):\n", users.len());
    for user in users {
        println!(
            "{:<12} {:<20} {:<30} {}",
            user.id, user.name, user.department, user.role
        );
    }

    Ok(())
}

pub fn show(config: &Config, id: &str) -> Result<()> {
    let user = UserStore::open(config).load_user(id)?;

    println!("ID:         {}", user.id);
    println!("Name:       {}", user.name);
    println!("Department: {}", user.department);
    println!("Role:       {}", user.role);

    Ok(())
}

pub fn delete(config: &Config, id: &str) -> Result<()> {
    UserStore::open(config).delete_user(id)?;
    println!("Deleted user: {}", id);
    Ok(())
}
