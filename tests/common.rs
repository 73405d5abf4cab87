/// Common test utilities for the store integration tests
///
/// Provides:
/// - `MockDevice`: a scripted device backend implementing the bridge,
///   with the same session rules as the native backend (commands out of
///   order are rejected with its messages)
/// - An in-process Esplora stand-in serving the three endpoints the
///   chain gateway consumes, backed by a programmable fixture
/// - `TestEnv` wiring both into a `WalletStore`
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rand::Rng;
use serde_json::{json, Value};

use hww_store::{
    BackendError, Device, DeviceBridge, DeviceClient, EsploraClient, WalletStore,
};

/// 12-word reference phrase the mock device hands out on initialize.
pub const TEST_MNEMONIC: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

pub fn init_logs() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

pub fn sample_devices() -> Vec<Device> {
    vec![
        Device {
            port: "/dev/ttyACM0".to_string(),
            vid: 0x303a,
            pid: 0x1001,
            manufacturer: Some("Espressif".to_string()),
            product: Some("ESP32-S3".to_string()),
        },
        Device {
            port: "/dev/ttyACM1".to_string(),
            vid: 0x2e8a,
            pid: 0x0005,
            manufacturer: None,
            product: None,
        },
    ]
}

#[derive(Default)]
struct Session {
    connected: Option<String>,
    initialized: bool,
}

/// Scripted device backend.
///
/// Commands follow the native backend's session rules; tests can inject
/// failures per command or replace a command's response payload outright.
pub struct MockDevice {
    session: Mutex<Session>,
    devices: Mutex<Vec<Device>>,
    failures: Mutex<HashMap<String, String>>,
    canned: Mutex<HashMap<String, Value>>,
    calls: Mutex<HashMap<String, usize>>,
}

impl MockDevice {
    pub fn new() -> Self {
        Self {
            session: Mutex::new(Session::default()),
            devices: Mutex::new(sample_devices()),
            failures: Mutex::new(HashMap::new()),
            canned: Mutex::new(HashMap::new()),
            calls: Mutex::new(HashMap::new()),
        }
    }

    pub fn set_devices(&self, devices: Vec<Device>) {
        *self.devices.lock().unwrap() = devices;
    }

    /// Make `command` fail with `message` until cleared.
    pub fn fail(&self, command: &str, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(command.to_string(), message.to_string());
    }

    pub fn clear_failures(&self) {
        self.failures.lock().unwrap().clear();
    }

    /// Replace the response payload for `command`.
    pub fn respond_with(&self, command: &str, value: Value) {
        self.canned
            .lock()
            .unwrap()
            .insert(command.to_string(), value);
    }

    /// How many times `command` reached the backend.
    pub fn calls(&self, command: &str) -> usize {
        self.calls.lock().unwrap().get(command).copied().unwrap_or(0)
    }

    fn not_connected() -> BackendError {
        BackendError::Failure("not connected to a device".to_string())
    }
}

#[async_trait]
impl DeviceBridge for MockDevice {
    async fn invoke(&self, command: &str, args: Value) -> Result<Value, BackendError> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(command.to_string())
            .or_insert(0) += 1;

        if let Some(message) = self.failures.lock().unwrap().get(command) {
            return Err(BackendError::Failure(message.clone()));
        }
        if let Some(value) = self.canned.lock().unwrap().get(command) {
            return Ok(value.clone());
        }

        match command {
            "scan_devices" => {
                let devices = self.devices.lock().unwrap().clone();
                Ok(serde_json::to_value(devices).unwrap())
            }
            "connect" => {
                let port = args["port"].as_str().unwrap_or_default().to_string();
                if port.is_empty() {
                    return Err(BackendError::Failure("port name cannot be empty".to_string()));
                }
                let mut session = self.session.lock().unwrap();
                if session.connected.is_some() {
                    return Err(BackendError::Failure(
                        "already connected to a device".to_string(),
                    ));
                }
                session.connected = Some(port);
                Ok(json!(true))
            }
            "disconnect" => {
                self.session.lock().unwrap().connected = None;
                Ok(json!(true))
            }
            "initialize_wallet" => {
                let mut session = self.session.lock().unwrap();
                if session.connected.is_none() {
                    return Err(Self::not_connected());
                }
                session.initialized = true;
                Ok(json!([TEST_MNEMONIC]))
            }
            "reset_wallet" => {
                let mut session = self.session.lock().unwrap();
                if session.connected.is_none() {
                    return Err(Self::not_connected());
                }
                session.initialized = false;
                Ok(Value::Null)
            }
            "get_wallet_status" => {
                let session = self.session.lock().unwrap();
                if session.connected.is_none() {
                    return Err(Self::not_connected());
                }
                Ok(json!(session.initialized))
            }
            "get_address" => {
                {
                    let session = self.session.lock().unwrap();
                    if session.connected.is_none() {
                        return Err(Self::not_connected());
                    }
                }
                // Random per-index latency so completion order scrambles
                let delay = rand::thread_rng().gen_range(1..=25);
                tokio::time::sleep(Duration::from_millis(delay)).await;
                let index = args["index"].as_u64().unwrap_or(0);
                Ok(json!(format!("addr-{}", index)))
            }
            other => Err(BackendError::Failure(format!("unknown command: {}", other))),
        }
    }
}

/// What the Esplora stand-in answers to POST /tx.
pub enum BroadcastReply {
    Accept { txid: String },
    Reject { status: u16, body: String },
}

/// Programmable Esplora state. Address maps hold raw JSON arrays so
/// tests control the exact wire shape, extra fields included.
pub struct EsploraFixture {
    pub utxos: HashMap<String, Value>,
    pub txs: HashMap<String, Value>,
    pub broadcast: BroadcastReply,
}

impl Default for EsploraFixture {
    fn default() -> Self {
        Self {
            utxos: HashMap::new(),
            txs: HashMap::new(),
            broadcast: BroadcastReply::Accept {
                txid: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855".to_string(),
            },
        }
    }
}

pub type SharedFixture = Arc<Mutex<EsploraFixture>>;

/// UTXO JSON the way Esplora emits it: unconfirmed entries carry no
/// block fields.
pub fn utxo_json(txid: &str, vout: u32, value: u64, confirmed: bool) -> Value {
    if confirmed {
        json!({
            "txid": txid,
            "vout": vout,
            "value": value,
            "status": {
                "confirmed": true,
                "block_height": 120_000,
                "block_hash": "000000000000000000021a8f9e6dc9a2c22cf9e2c9a3b1f7d5a0e3b2c1d0f9e8",
                "block_time": 1_722_000_000u64
            }
        })
    } else {
        json!({
            "txid": txid,
            "vout": vout,
            "value": value,
            "status": { "confirmed": false }
        })
    }
}

async fn broadcast_handler(State(fixture): State<SharedFixture>, body: String) -> Response {
    log::debug!("Mock esplora: POST /tx ({} bytes)", body.len());
    match &fixture.lock().unwrap().broadcast {
        BroadcastReply::Accept { txid } => (StatusCode::OK, txid.clone()).into_response(),
        BroadcastReply::Reject { status, body } => {
            let status = StatusCode::from_u16(*status).unwrap();
            (status, body.clone()).into_response()
        }
    }
}

async fn utxo_handler(
    State(fixture): State<SharedFixture>,
    Path(address): Path<String>,
) -> Json<Value> {
    let fixture = fixture.lock().unwrap();
    Json(fixture.utxos.get(&address).cloned().unwrap_or_else(|| json!([])))
}

async fn txs_handler(
    State(fixture): State<SharedFixture>,
    Path(address): Path<String>,
) -> Json<Value> {
    let fixture = fixture.lock().unwrap();
    Json(fixture.txs.get(&address).cloned().unwrap_or_else(|| json!([])))
}

/// Start the Esplora stand-in on an ephemeral port. Returns its base URL
/// and a handle for reprogramming it mid-test.
pub async fn spawn_esplora(fixture: EsploraFixture) -> anyhow::Result<(String, SharedFixture)> {
    let shared: SharedFixture = Arc::new(Mutex::new(fixture));

    let app = Router::new()
        .route("/tx", post(broadcast_handler))
        .route("/address/:address/utxo", get(utxo_handler))
        .route("/address/:address/txs", get(txs_handler))
        .with_state(shared.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);
    log::info!("🚀 Mock esplora listening on {}", base_url);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            log::warn!("Mock esplora stopped: {}", e);
        }
    });

    Ok((base_url, shared))
}

/// Full wiring for wallet store tests: mock device + mock chain.
pub struct TestEnv {
    pub device: Arc<MockDevice>,
    pub wallet: WalletStore,
    pub esplora: SharedFixture,
}

impl TestEnv {
    pub async fn new() -> anyhow::Result<Self> {
        init_logs();
        let device = Arc::new(MockDevice::new());
        let (base_url, esplora) = spawn_esplora(EsploraFixture::default()).await?;
        let wallet = WalletStore::new(
            DeviceClient::new(device.clone()),
            EsploraClient::new(base_url),
        );
        Ok(Self {
            device,
            wallet,
            esplora,
        })
    }
}
