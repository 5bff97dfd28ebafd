//! Protobuf messages of the Cosmos gRPC services reached through `abci_query`

/// `cosmwasm.wasm.v1.QuerySmartContractStateRequest`
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QuerySmartContractStateRequest {
    #[prost(string, tag = "1")]
    pub address: ::prost::alloc::string::String,
    /// JSON-encoded contract query
    #[prost(bytes = "vec", tag = "2")]
    pub query_data: ::prost::alloc::vec::Vec<u8>,
}

/// `cosmwasm.wasm.v1.QuerySmartContractStateResponse`
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QuerySmartContractStateResponse {
    /// JSON-encoded contract answer
    #[prost(bytes = "vec", tag = "1")]
    pub data: ::prost::alloc::vec::Vec<u8>,
}

/// `cosmos.tx.v1beta1.SimulateRequest`; field 1 (`tx`) is deprecated
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SimulateRequest {
    #[prost(bytes = "vec", tag = "2")]
    pub tx_bytes: ::prost::alloc::vec::Vec<u8>,
}

/// `cosmos.tx.v1beta1.SimulateResponse`; the execution result is not read
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SimulateResponse {
    #[prost(message, optional, tag = "1")]
    pub gas_info: ::core::option::Option<GasInfo>,
}

/// `cosmos.base.abci.v1beta1.GasInfo`
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GasInfo {
    #[prost(uint64, tag = "1")]
    pub gas_wanted: u64,
    #[prost(uint64, tag = "2")]
    pub gas_used: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn smart_query_request_wire_layout() {
        let request = QuerySmartContractStateRequest {
            address: "juno1c".to_string(),
            query_data: br#"{"config":{}}"#.to_vec(),
        };
        let bytes = request.encode_to_vec();
        assert_eq!(&bytes[..8], &[0x0a, 0x06, b'j', b'u', b'n', b'o', b'1', b'c']);
        assert_eq!(bytes[8], 0x12);
        assert_eq!(&bytes[10..], br#"{"config":{}}"#);
    }

    #[test]
    fn simulate_response_skips_unknown_result_field() {
        // gas_info { gas_wanted: 5, gas_used: 300 }, then an empty result message
        let payload = [0x0a, 0x05, 0x08, 0x05, 0x10, 0xac, 0x02, 0x12, 0x00];
        let response = SimulateResponse::decode(payload.as_slice()).unwrap();
        assert_eq!(
            response.gas_info,
            Some(GasInfo {
                gas_wanted: 5,
                gas_used: 300
            })
        );
    }
}
