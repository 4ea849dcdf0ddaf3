//! Scripted modem adapter.
//!
//! Plays a fixed list of URCs into the inbound queue from a background
//! thread, the way the modem library's URC callback would.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{info, warn};

use crate::app::ports::ModemPort;
use crate::classify::UrcParam;
use crate::classify::modem::{CallInfo, UrcKind};
use crate::config::ModemConfig;
use crate::error::InitError;
use crate::events::InboundQueue;

/// One scripted URC: raw code plus its parameter.
pub type UrcItem = (u32, UrcParam);

pub struct ReplayModem {
    script: Vec<UrcItem>,
    interval: Duration,
    started: bool,
    worker: Option<JoinHandle<()>>,
}

impl ReplayModem {
    pub fn new(script: Vec<UrcItem>, interval: Duration) -> Self {
        Self {
            script,
            interval,
            started: false,
            worker: None,
        }
    }

    /// Typical power-on sequence followed by an SMS and a voice call.
    pub fn boot_sequence() -> Vec<UrcItem> {
        let v = UrcParam::Value;
        vec![
            (UrcKind::SysInitState.code(), v(0)),
            (UrcKind::SysInitState.code(), v(1)),
            (UrcKind::SimCardState.code(), v(1)),
            (UrcKind::CfunState.code(), v(1)),
            (UrcKind::NetworkState.code(), v(1)),
            (UrcKind::SysInitState.code(), v(3)),
            (UrcKind::GprsState.code(), v(1)),
            (UrcKind::BatteryVoltage.code(), v(4012)),
            (UrcKind::NewSms.code(), v(3)),
            (UrcKind::IncomingCall.code(), UrcParam::Call(CallInfo::new("+911234567890"))),
            (UrcKind::CallState.code(), v(2)),
        ]
    }

    /// Wait for the script to finish.  Returns immediately if never started.
    pub fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Modem replay thread panicked");
            }
        }
    }
}

impl ModemPort for ReplayModem {
    fn start(&mut self, config: &ModemConfig, queue: &'static InboundQueue) -> Result<(), InitError> {
        if self.started {
            return Err(InitError::AlreadyStarted);
        }
        if config.port.is_empty() {
            return Err(InitError::PortUnavailable("modem"));
        }
        info!("Modem replay on {} ({} URC(s))", config.port, self.script.len());

        let script = self.script.clone();
        let interval = self.interval;
        let worker = thread::Builder::new()
            .name("modem-replay".into())
            .spawn(move || {
                for (code, param) in script {
                    thread::sleep(interval);
                    queue.push_urc(code, param);
                }
                info!("Modem replay finished");
            })
            .map_err(|_| InitError::Rejected("modem worker thread"))?;
        self.worker = Some(worker);
        self.started = true;
        Ok(())
    }
}
