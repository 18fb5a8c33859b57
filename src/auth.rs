use anyhow::{Context, Result, bail};
use std::io::{self, BufRead, IsTerminal};
use zeroize::Zeroizing;

pub const PASSWORD_ENV: &str = "SEALPASS_PASSWORD";

/// Reads the password to check.
///
/// Tried in order: `SEALPASS_PASSWORD`, the first line of piped stdin,
/// then a TTY prompt.
pub fn read_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = from_env() {
        return Ok(pw);
    }

    if !io::stdin().is_terminal() {
        let pw = read_line(&mut io::stdin().lock())?;
        if !pw.is_empty() {
            return Ok(pw);
        }
        bail!("no password on stdin");
    }

    let pw = Zeroizing::new(rpassword::prompt_password("Password: ")?);
    if pw.is_empty() {
        bail!("password cannot be empty");
    }
    Ok(pw)
}

/// Reads a password that is about to be hashed.
///
/// Piped stdin must carry the password twice, one per line, same as the
/// TTY prompt asks for it twice.
pub fn read_new_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = from_env() {
        return Ok(pw);
    }

    let (pw1, pw2) = if io::stdin().is_terminal() {
        (
            Zeroizing::new(rpassword::prompt_password("New password: ")?),
            Zeroizing::new(rpassword::prompt_password("Confirm password: ")?),
        )
    } else {
        let stdin = io::stdin();
        let mut handle = stdin.lock();
        (read_line(&mut handle)?, read_line(&mut handle)?)
    };

    if pw1.is_empty() {
        bail!("password cannot be empty");
    }
    if pw1 != pw2 {
        bail!("passwords do not match");
    }
    Ok(pw1)
}

fn from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}

fn read_line(input: &mut impl BufRead) -> Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    input
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    trim_newline(&mut line);
    Ok(line)
}

fn trim_newline(s: &mut String) {
    while s.ends_with('\n') || s.ends_with('\r') {
        s.pop();
    }
}
