// app/src/services/otp_service.rs

use chrono::{Duration, Utc};
use rand_core::{OsRng, RngCore};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::errors::Result;
use crate::models::Otp;
use crate::repositories::OtpRepository;

const CODE_SPACE: u32 = 1_000_000;
/// Largest multiple of `CODE_SPACE` that fits in a `u32`; draws at or above
/// it are rejected so every code is equally likely.
const REJECT_FROM: u32 = (u32::MAX / CODE_SPACE) * CODE_SPACE;

/// A uniformly distributed six digit code, leading zeros kept.
pub fn generate_code<R: RngCore>(rng: &mut R) -> String {
  loop {
    let draw = rng.next_u32();
    if draw < REJECT_FROM {
      return format!("{:06}", draw % CODE_SPACE);
    }
  }
}

/// Issues and verifies one-time passcodes.
///
/// Issuing never invalidates earlier codes for the same email: each stays
/// usable until it expires or is consumed.
#[derive(Clone)]
pub struct OtpService {
  otps: Arc<dyn OtpRepository>,
  ttl: Duration,
}

impl OtpService {
  pub fn new(otps: Arc<dyn OtpRepository>, ttl_minutes: i64) -> Self {
    Self {
      otps,
      ttl: Duration::minutes(ttl_minutes),
    }
  }

  #[instrument(name = "otp_service::generate", skip(self))]
  pub async fn generate(&self, email: &str) -> Result<Otp> {
    let code = generate_code(&mut OsRng);
    let otp = self.otps.insert(email, &code, Utc::now() + self.ttl).await?;
    info!(otp_id = otp.id, "OTP issued.");
    Ok(otp)
  }

  /// `true` exactly once per issued code, and only before it expires.
  #[instrument(name = "otp_service::verify", skip(self, code))]
  pub async fn verify(&self, email: &str, code: &str) -> Result<bool> {
    match self.otps.consume(email, code, Utc::now()).await? {
      Some(otp) => {
        info!(otp_id = otp.id, "OTP verified.");
        Ok(true)
      }
      None => {
        warn!("OTP verification failed.");
        Ok(false)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Replays a fixed sequence of draws.
  struct Scripted(Vec<u32>);

  impl RngCore for Scripted {
    fn next_u32(&mut self) -> u32 {
      self.0.remove(0)
    }

    fn next_u64(&mut self) -> u64 {
      u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
      for byte in dest {
        *byte = self.next_u32() as u8;
      }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand_core::Error> {
      self.fill_bytes(dest);
      Ok(())
    }
  }

  #[test]
  fn codes_are_zero_padded() {
    assert_eq!(generate_code(&mut Scripted(vec![42])), "000042");
    assert_eq!(generate_code(&mut Scripted(vec![1_999_999])), "999999");
  }

  #[test]
  fn biased_tail_draws_are_rejected() {
    assert_eq!(REJECT_FROM, 4_294_000_000);
    assert_eq!(generate_code(&mut Scripted(vec![u32::MAX, REJECT_FROM, 7])), "000007");
  }

  #[test]
  fn os_rng_codes_are_six_digits() {
    for _ in 0..32 {
      let code = generate_code(&mut OsRng);
      assert_eq!(code.len(), 6);
      assert!(code.chars().all(|c| c.is_ascii_digit()));
    }
  }
}
