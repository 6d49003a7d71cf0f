//! Stream listing against the payment-stream subgraph.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use lenfluencer_shared::{Address, FlowRate, Stream};

use crate::error::{GraphError, Result};
use crate::transport::GraphTransport;

/// Streams toward a receiver, newest first.
const STREAMS_QUERY: &str = r#"
query streams($skip: Int, $first: Int, $orderBy: Stream_orderBy, $orderDirection: OrderDirection, $where: Stream_filter) {
  streams(skip: $skip, first: $first, orderBy: $orderBy, orderDirection: $orderDirection, where: $where) {
    id
    sender
    receiver
    token
    currentFlowRate
    createdAtTimestamp
    updatedAtTimestamp
  }
}
"#;

/// Filter for [`StreamClient::list_streams`].
///
/// `sender: None` lists streams from all senders (the "show all"
/// toggle); a set sender restricts to that account. `active_only`
/// excludes terminated (zero-rate) streams.
#[derive(Debug, Clone)]
pub struct StreamFilter {
    pub token: Address,
    pub receiver: Address,
    pub sender: Option<Address>,
    pub active_only: bool,
    pub skip: u64,
    pub first: u64,
}

impl StreamFilter {
    /// Active streams of `token` toward `receiver`, first page.
    pub fn active(token: Address, receiver: Address) -> Self {
        Self {
            token,
            receiver,
            sender: None,
            active_only: true,
            skip: 0,
            first: 100,
        }
    }

    pub fn from_sender(mut self, sender: Address) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn page(mut self, skip: u64, first: u64) -> Self {
        self.skip = skip;
        self.first = first;
        self
    }

    /// The subgraph `where` object. Addresses are lowercase by
    /// construction, which the ledger's string matching requires.
    fn where_clause(&self) -> Value {
        let mut clause = json!({
            "token": self.token.as_str(),
            "receiver": self.receiver.as_str(),
        });

        if self.active_only {
            clause["currentFlowRate_gt"] = json!("0");
        }
        if let Some(sender) = &self.sender {
            clause["sender"] = json!(sender.as_str());
        }

        clause
    }

    fn variables(&self) -> Value {
        json!({
            "skip": self.skip,
            "first": self.first,
            "orderBy": "createdAtTimestamp",
            "orderDirection": "desc",
            "where": self.where_clause(),
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamRow {
    id: String,
    sender: Address,
    receiver: Address,
    token: Address,
    current_flow_rate: String,
    created_at_timestamp: String,
    updated_at_timestamp: String,
}

impl TryFrom<StreamRow> for Stream {
    type Error = GraphError;

    fn try_from(row: StreamRow) -> Result<Stream> {
        let current_flow_rate = FlowRate::from_wire(&row.current_flow_rate)
            .map_err(|e| GraphError::Decode(e.to_string()))?;
        let created_at = parse_timestamp(&row.created_at_timestamp)?;
        let updated_at = parse_timestamp(&row.updated_at_timestamp)?;

        Ok(Stream {
            id: row.id,
            sender: row.sender,
            receiver: row.receiver,
            token: row.token,
            current_flow_rate,
            created_at,
            updated_at,
        })
    }
}

fn parse_timestamp(s: &str) -> Result<i64> {
    s.parse::<i64>()
        .map_err(|_| GraphError::Decode(format!("bad timestamp: {s}")))
}

/// Client for the stream ledger. Read-only; mutations happen on-chain
/// and are observed by re-querying.
pub struct StreamClient {
    transport: Arc<dyn GraphTransport>,
}

impl StreamClient {
    pub fn new(transport: Arc<dyn GraphTransport>) -> Self {
        Self { transport }
    }

    /// List streams matching `filter`, ordered by creation timestamp
    /// descending. A working empty state is the caller's concern on error.
    pub async fn list_streams(&self, filter: &StreamFilter) -> Result<Vec<Stream>> {
        debug!(
            receiver = %filter.receiver,
            sender = ?filter.sender.as_ref().map(Address::as_str),
            active_only = filter.active_only,
            "Listing streams"
        );

        let data = self.transport.execute(STREAMS_QUERY, filter.variables()).await?;
        decode_streams(data)
    }
}

fn decode_streams(data: Value) -> Result<Vec<Stream>> {
    let rows = data
        .get("streams")
        .and_then(Value::as_array)
        .ok_or_else(|| GraphError::Decode("missing streams".into()))?;

    let mut streams = Vec::with_capacity(rows.len());
    for row in rows {
        let row: StreamRow = serde_json::from_value(row.clone())
            .map_err(|e| GraphError::Decode(e.to_string()))?;
        streams.push(Stream::try_from(row)?);
    }
    Ok(streams)
}
