//! The reversible integer-to-string codec.
//!
//! The scheme is a salted base conversion: the configured alphabet is split
//! into digit, separator, and guard characters; a lottery character derived
//! from the value seeds a per-call shuffle of the digit alphabet; the value
//! is then base-converted over the shuffled digits and padded with guards
//! and further shuffles up to the minimum length. Decoding re-derives the
//! same shuffles, converts back, and finally re-encodes the candidate value
//! to verify the input byte-for-byte. Anything the codec did not itself
//! produce fails that comparison and decodes to `None`.

use crate::config::{CodecError, OpaqueIdConfig, MAX_MIN_LENGTH, MIN_ALPHABET_LENGTH};

/// Characters preferred as separators, as far as the alphabet contains them.
const SEPARATOR_CANDIDATES: &str = "cfhistuCFHISTU";

/// A validated, immutable opaque-identifier codec.
///
/// Cheap to clone; safe to share across request handlers.
#[derive(Debug, Clone)]
pub struct OpaqueIdCodec {
    salt: Vec<char>,
    min_length: usize,
    alphabet: Vec<char>,
    separators: Vec<char>,
    guards: Vec<char>,
}

impl OpaqueIdCodec {
    /// Validate the configuration and derive the internal character sets.
    ///
    /// All configuration misuse is reported here, never from
    /// [`encode`](Self::encode) or [`decode`](Self::decode).
    pub fn new(config: &OpaqueIdConfig) -> Result<Self, CodecError> {
        if config.salt.is_empty() {
            return Err(CodecError::EmptySalt);
        }
        if config.min_length > MAX_MIN_LENGTH {
            return Err(CodecError::MinLengthTooLarge(config.min_length));
        }

        let mut alphabet: Vec<char> = Vec::new();
        for c in config.alphabet.chars() {
            if c.is_whitespace() {
                return Err(CodecError::WhitespaceInAlphabet);
            }
            if alphabet.contains(&c) {
                return Err(CodecError::DuplicateAlphabetChar(c));
            }
            alphabet.push(c);
        }
        if alphabet.len() < MIN_ALPHABET_LENGTH {
            return Err(CodecError::AlphabetTooSmall(alphabet.len()));
        }

        let salt: Vec<char> = config.salt.chars().collect();

        let mut separators: Vec<char> = SEPARATOR_CANDIDATES
            .chars()
            .filter(|c| alphabet.contains(c))
            .collect();
        alphabet.retain(|c| !separators.contains(c));
        consistent_shuffle(&mut separators, &salt);

        // Keep roughly one separator per 3.5 digit characters.
        if separators.is_empty() || alphabet.len() * 2 > separators.len() * 7 {
            let mut needed = (alphabet.len() * 2).div_ceil(7);
            if needed == 1 {
                needed = 2;
            }
            if needed > separators.len() {
                let diff = needed - separators.len();
                separators.extend(alphabet.drain(..diff));
            } else {
                separators.truncate(needed);
            }
        }

        consistent_shuffle(&mut alphabet, &salt);

        // One guard per 12 digit characters.
        let guard_count = alphabet.len().div_ceil(12);
        let guards;
        if alphabet.len() < 3 {
            guards = separators[..guard_count].to_vec();
            separators.drain(..guard_count);
        } else {
            guards = alphabet[..guard_count].to_vec();
            alphabet.drain(..guard_count);
        }

        Ok(Self {
            salt,
            min_length: config.min_length,
            alphabet,
            separators,
            guards,
        })
    }

    /// Encode an identifier into its opaque string form.
    ///
    /// Deterministic: the same configuration and identifier always produce
    /// the same string. Total: every `u64` encodes.
    pub fn encode(&self, id: u64) -> String {
        let mut alphabet = self.alphabet.clone();
        let value_hash = (id % 100) as usize;
        let lottery = alphabet[value_hash % alphabet.len()];

        let mut result: Vec<char> = vec![lottery];

        let buffer: Vec<char> = std::iter::once(lottery)
            .chain(self.salt.iter().copied())
            .chain(alphabet.iter().copied())
            .take(alphabet.len())
            .collect();
        consistent_shuffle(&mut alphabet, &buffer);
        result.extend(to_base(id, &alphabet));

        if result.len() < self.min_length {
            let guard_index = (value_hash + result[0] as usize) % self.guards.len();
            result.insert(0, self.guards[guard_index]);

            if result.len() < self.min_length {
                let guard_index = (value_hash + result[2] as usize) % self.guards.len();
                result.push(self.guards[guard_index]);
            }
        }

        let half = alphabet.len() / 2;
        while result.len() < self.min_length {
            let shuffle_salt = alphabet.clone();
            consistent_shuffle(&mut alphabet, &shuffle_salt);

            let mut padded: Vec<char> = alphabet[half..].to_vec();
            padded.extend(result.iter().copied());
            padded.extend(alphabet[..half].iter().copied());
            result = padded;

            let excess = result.len().saturating_sub(self.min_length);
            if excess > 0 {
                let start = excess / 2;
                result = result[start..start + self.min_length].to_vec();
            }
        }

        result.into_iter().collect()
    }

    /// Decode an opaque string back to the identifier it was issued for.
    ///
    /// Returns `None` for malformed, foreign, or tampered input. Never
    /// panics and never errors: absence is data, not a failure.
    pub fn decode(&self, input: &str) -> Option<u64> {
        if input.is_empty() {
            return None;
        }

        let segments: Vec<&str> = input.split(|c| self.guards.contains(&c)).collect();
        let payload = match segments.len() {
            1 => segments[0],
            2 | 3 => segments[1],
            _ => return None,
        };
        if payload.is_empty() {
            return None;
        }

        let mut chars = payload.chars();
        let lottery = chars.next()?;
        let digits = chars.as_str();
        if digits
            .chars()
            .any(|c| self.separators.contains(&c))
        {
            return None;
        }

        let mut alphabet = self.alphabet.clone();
        let buffer: Vec<char> = std::iter::once(lottery)
            .chain(self.salt.iter().copied())
            .chain(alphabet.iter().copied())
            .take(alphabet.len())
            .collect();
        consistent_shuffle(&mut alphabet, &buffer);

        let id = from_base(digits, &alphabet)?;

        // Only strings this codec issued survive the round trip.
        if self.encode(id) == input {
            Some(id)
        } else {
            None
        }
    }

    /// Stateless decode helper mirroring [`decode`](Self::decode).
    ///
    /// Exists so callers holding only an opaque string, and no entity, can
    /// recover the primary key.
    pub fn find_id_by_opaque(&self, opaque: &str) -> Option<u64> {
        self.decode(opaque)
    }

    /// The configured minimum output length.
    pub fn min_length(&self) -> usize {
        self.min_length
    }
}

/// Salt-driven deterministic permutation, applied in place.
fn consistent_shuffle(chars: &mut [char], salt: &[char]) {
    if salt.is_empty() {
        return;
    }

    let mut ordinal_sum = 0usize;
    let mut salt_index = 0usize;
    for i in (1..chars.len()).rev() {
        salt_index %= salt.len();
        let ordinal = salt[salt_index] as usize;
        ordinal_sum += ordinal;
        let j = (ordinal + salt_index + ordinal_sum) % i;
        chars.swap(i, j);
        salt_index += 1;
    }
}

/// Base conversion of `value` over `alphabet`, most significant digit first.
fn to_base(mut value: u64, alphabet: &[char]) -> Vec<char> {
    let base = alphabet.len() as u64;
    let mut digits = Vec::new();
    loop {
        digits.push(alphabet[(value % base) as usize]);
        value /= base;
        if value == 0 {
            break;
        }
    }
    digits.reverse();
    digits
}

/// Inverse of [`to_base`]. `None` on foreign characters or overflow.
fn from_base(input: &str, alphabet: &[char]) -> Option<u64> {
    if input.is_empty() {
        return None;
    }

    let base = alphabet.len() as u64;
    let mut value: u64 = 0;
    for c in input.chars() {
        let position = alphabet.iter().position(|&a| a == c)? as u64;
        value = value.checked_mul(base)?.checked_add(position)?;
    }
    Some(value)
}
