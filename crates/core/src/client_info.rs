// SPDX-License-Identifier: MIT

//! Client identity (spec.md §3 "ClientInfo").

/// What a user-facing daemon reports about itself on `ArriveAsClient`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub install_id: String,
    pub product: String,
    pub version: String,
    pub api_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_info_serde_round_trips() {
        let client = ClientInfo {
            name: "ambassador".to_string(),
            install_id: "abc-123".to_string(),
            product: "telepresence".to_string(),
            version: "2.20.0".to_string(),
            api_key: None,
        };
        let json = serde_json::to_string(&client).unwrap();
        let parsed: ClientInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, client);
    }
}
