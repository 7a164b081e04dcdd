//! Minecraft account identifiers.

use uuid::Uuid;

/// Normalise a Minecraft account UUID to the 32-digit lower-case hex form the
/// Mojang API returns (`069a79f444e94726a5befca90e38aaf5`).
///
/// Accepts every spelling `Uuid::try_parse` does (dashed, undashed, braced,
/// `urn:uuid:`). Returns `None` when the input is not a UUID.
pub fn normalize_mc_uuid(raw: &str) -> Option<String> {
    Uuid::try_parse(raw.trim())
        .ok()
        .map(|uuid| uuid.simple().to_string())
}
