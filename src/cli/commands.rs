//! 不需要启动服务器的辅助命令

use std::io::{self, IsTerminal, Write};

use colored::Colorize;

use crate::errors::{LinkError, Result};
use crate::utils::password::hash_password;
use crate::utils::{decode_id, encode_id};

/// 输出 Argon2id 哈希，可直接写入配置文件的 `password`
pub fn run_hash_password(password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt_password_with_confirm()?,
    };

    if password.is_empty() {
        return Err(LinkError::config("Password must not be empty"));
    }

    let hashed = hash_password(&password)?;
    println!("{}", hashed);
    eprintln!(
        "{} Put this value into the \"password\" key of your config file",
        "✓".green().bold()
    );
    Ok(())
}

pub fn run_encode(id: u32) {
    println!("{}", encode_id(id));
}

pub fn run_decode(code: &str) -> Result<()> {
    println!("{}", decode_id(code)?);
    Ok(())
}

/// 交互式输入密码（带确认）
fn prompt_password_with_confirm() -> Result<String> {
    if !io::stdin().is_terminal() {
        return Err(LinkError::config(
            "No password provided. Pass it as an argument or run interactively.",
        ));
    }

    let password = read_hidden("Enter password: ")?;
    let confirm = read_hidden("Confirm password: ")?;

    if password != confirm {
        return Err(LinkError::config("Passwords do not match"));
    }

    Ok(password)
}

fn read_hidden(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    rpassword::read_password()
        .map_err(|e| LinkError::file_operation(format!("Failed to read password: {}", e)))
}
