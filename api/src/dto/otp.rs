use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    /// Recipient address, used verbatim as the record key.
    /// A missing field deserializes to "" and is rejected by the service.
    /// 320 is the widest address the MySQL store holds.
    #[serde(default)]
    #[validate(length(max = 320))]
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    #[validate(length(max = 320))]
    pub email: String,

    /// Code as received by email
    #[serde(default)]
    #[validate(length(max = 32))]
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpResponse {
    pub message: String,
    pub expires_in: i64, // seconds the code stays valid
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub message: String,
}
