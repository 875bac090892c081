use anyhow::{Context, bail};
use clap::Args;
use time::{Duration, OffsetDateTime, format_description::well_known::Rfc3339};
use xdauth_token::{ClaimSet, ClaimValue, TokenService, token};

use crate::config::AppConfig;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Subject identifier (e.g. customer ID)
    #[arg(long, short = 's', default_value = "default_user")]
    pub subject: String,

    /// Token lifetime in seconds (defaults to XDAUTH_TOKEN_LIFETIME_SECS)
    #[arg(long, short = 'e', allow_negative_numbers = true)]
    pub expiration: Option<i64>,

    /// Custom claim as name:value, repeatable. `true`/`false` and numbers are typed.
    #[arg(long = "claim", short = 'c', value_parser = parse_claim)]
    pub claims: Vec<(String, ClaimValue)>,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Token to validate
    pub token: String,
}

/// Parses `name:value`, typing booleans and numbers.
pub fn parse_claim(raw: &str) -> Result<(String, ClaimValue), String> {
    let (name, value) = raw
        .split_once(':')
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("invalid claim format: {raw}. Use name:value"))?;

    let value = match value {
        "true" => ClaimValue::Boolean(true),
        "false" => ClaimValue::Boolean(false),
        v => {
            if let Ok(n) = v.parse::<i64>() {
                ClaimValue::Integer(n)
            } else if let Some(f) = v.parse::<f64>().ok().filter(|f| f.is_finite()) {
                ClaimValue::Float(f)
            } else {
                ClaimValue::String(v.to_string())
            }
        }
    };

    Ok((name.to_string(), value))
}

pub fn generate(config: &AppConfig, args: GenerateArgs) -> anyhow::Result<()> {
    let service = TokenService::new(config.token.clone(), config.key_provider());

    let mut claims = ClaimSet::new();
    claims.set_subject(args.subject);
    for (name, value) in args.claims {
        claims.insert(name, value);
    }

    println!("Generating token with payload:");
    println!("{}", serde_json::to_string_pretty(&claims)?);
    println!();

    let lifetime = args.expiration.map(Duration::seconds);
    let jwt = service
        .generate_token(claims, lifetime)
        .context("Error generating token")?;

    println!("Token generated successfully!");
    println!();
    println!("{jwt}");
    println!();

    let (_, stamped) = token::inspect(&jwt)?;
    if let Some(exp) = stamped.expires_at() {
        println!("Token expires at: {}", format_timestamp(exp)?);
        let remaining = exp - OffsetDateTime::now_utc().unix_timestamp();
        println!(
            "Token valid for: {} seconds ({} minutes)",
            remaining,
            remaining / 60
        );
    }

    Ok(())
}

pub fn validate(config: &AppConfig, args: ValidateArgs) -> anyhow::Result<()> {
    let service = TokenService::new(config.token.clone(), config.key_provider());

    println!("Validating token...");
    println!();

    let claims = match service.validate_token(&args.token) {
        Ok(claims) => claims,
        Err(e) => bail!("Token is invalid ({}): {}", e.code(), e),
    };

    println!("Token is valid!");
    println!();

    let segments: Vec<&str> = args.token.split('.').collect();
    if let [header, payload, signature] = segments.as_slice() {
        println!("Token structure:");
        println!("- Header: {header}");
        println!("- Payload: {payload}");
        println!("- Signature: {signature}");
        println!();
    }

    let (header, _) = token::inspect(&args.token)?;
    println!("Header:");
    println!("{}", serde_json::to_string_pretty(&header)?);
    println!();

    println!("Token claims:");
    println!("{}", serde_json::to_string_pretty(&claims)?);
    println!();

    if let Some(iat) = claims.issued_at() {
        println!("Issued at: {}", format_timestamp(iat)?);
    }
    if let Some(exp) = claims.expires_at() {
        println!("Expires at: {}", format_timestamp(exp)?);
        let remaining = exp - OffsetDateTime::now_utc().unix_timestamp();
        if remaining > 0 {
            println!("Token valid for: {remaining} more seconds");
        } else {
            println!("Token expired {} seconds ago", -remaining);
        }
    }

    Ok(())
}

fn format_timestamp(ts: i64) -> anyhow::Result<String> {
    let at = OffsetDateTime::from_unix_timestamp(ts)
        .with_context(|| format!("timestamp {ts} out of range"))?;
    Ok(at.format(&Rfc3339)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_claim_types() {
        assert_eq!(
            parse_claim("email:test@example.com").unwrap(),
            ("email".to_string(), ClaimValue::String("test@example.com".into()))
        );
        assert_eq!(
            parse_claim("admin:true").unwrap().1,
            ClaimValue::Boolean(true)
        );
        assert_eq!(
            parse_claim("admin:false").unwrap().1,
            ClaimValue::Boolean(false)
        );
        assert_eq!(parse_claim("age:42").unwrap().1, ClaimValue::Integer(42));
        assert_eq!(parse_claim("ratio:0.5").unwrap().1, ClaimValue::Float(0.5));
    }

    #[test]
    fn test_parse_claim_keeps_colons_in_value() {
        assert_eq!(
            parse_claim("iss:https://a.example/").unwrap().1,
            ClaimValue::String("https://a.example/".into())
        );
    }

    #[test]
    fn test_parse_claim_rejects_bad_format() {
        assert!(parse_claim("no-colon").is_err());
        assert!(parse_claim(":value").is_err());
    }

    #[test]
    fn test_parse_claim_non_finite_is_string() {
        assert_eq!(
            parse_claim("x:NaN").unwrap().1,
            ClaimValue::String("NaN".into())
        );
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(1700000000).unwrap(), "2023-11-14T22:13:20Z");
    }
}
