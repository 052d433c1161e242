use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::minecraft::java::chat;
use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::{CodecError, CodecResult, ProtocolString};

pub const CLIENTBOUND_RESPONSE_ID: i32 = 0x00;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientBoundResponse {
    pub json_response: ProtocolString,
}

packet_fields!(ClientBoundResponse { json_response });
packet_meta!(
    ClientBoundResponse,
    CLIENTBOUND_RESPONSE_ID,
    Status,
    Clientbound,
    "StatusResponse"
);

impl ClientBoundResponse {
    pub fn new(json: impl Into<String>) -> Self {
        Self {
            json_response: ProtocolString(json.into()),
        }
    }

    pub fn parse(&self) -> CodecResult<ServerStatus> {
        serde_json::from_str(self.json_response.as_str())
            .map_err(|e| CodecError::invalid_encoding(format!("status JSON: {e}")))
    }
}

/// The status document a server returns in the status phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub version: VersionJSON,
    #[serde(default)]
    pub players: PlayersJSON,
    #[serde(default)]
    pub description: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    /// Round trip of the status ping, filled in by the client.
    #[serde(skip)]
    pub latency: Option<Duration>,
}

impl ServerStatus {
    pub fn description_text(&self) -> String {
        chat::component_text(&self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionJSON {
    pub name: String,
    pub protocol: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayersJSON {
    pub max: i32,
    pub online: i32,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sample: Vec<PlayerSampleJSON>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSampleJSON {
    pub name: String,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        let response = ClientBoundResponse::new(
            r#"{
                "version": {"name": "1.16.5", "protocol": 754},
                "players": {"max": 20, "online": 1, "sample": [{"name": "Steve", "id": "4566e69f-c907-48ee-8d71-d7ba5aa00d20"}]},
                "description": {"text": "A Minecraft Server"}
            }"#,
        );

        let status = response.parse().unwrap();
        assert_eq!(status.version.protocol, 754);
        assert_eq!(status.players.online, 1);
        assert_eq!(status.players.sample[0].name, "Steve");
        assert_eq!(status.description_text(), "A Minecraft Server");
        assert!(status.favicon.is_none());
        assert!(status.latency.is_none());
    }

    #[test]
    fn test_parse_minimal_status() {
        let status = ClientBoundResponse::new(r#"{"version":{"name":"x","protocol":1},"description":"motd"}"#)
            .parse()
            .unwrap();
        assert_eq!(status.players.max, 0);
        assert_eq!(status.description_text(), "motd");
    }

    #[test]
    fn test_parse_invalid_status() {
        assert!(ClientBoundResponse::new("{").parse().is_err());
    }
}
