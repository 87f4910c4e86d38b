// Shared test helpers: fake /proc and power-supply trees in a temp dir.
#![allow(dead_code)]

use dwmstatus::config::AppConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const NET_DEV_HEADER: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
";

pub const MEMINFO_40: &str = "\
MemTotal:        1000 kB
MemFree:          400 kB
MemAvailable:     600 kB
Buffers:          100 kB
Cached:           100 kB
";

pub struct FakeSystem {
    pub dir: TempDir,
}

impl FakeSystem {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("proc/net")).unwrap();
        fs::create_dir_all(dir.path().join("power_supply")).unwrap();
        Self { dir }
    }

    pub fn proc_root(&self) -> PathBuf {
        self.dir.path().join("proc")
    }

    pub fn power_supply(&self) -> PathBuf {
        self.dir.path().join("power_supply")
    }

    pub fn net_dev_path(&self) -> PathBuf {
        self.proc_root().join("net/dev")
    }

    /// Write /proc/net/dev with one record per (name, rx, tx).
    pub fn set_net_dev(&self, devs: &[(&str, u64, u64)]) {
        let mut s = NET_DEV_HEADER.to_string();
        for (name, rx, tx) in devs {
            s.push_str(&format!(
                "{name:>6}: {rx} 100 0 0 0 0 0 0 {tx} 90 0 0 0 0 0 0\n"
            ));
        }
        fs::write(self.net_dev_path(), s).unwrap();
    }

    pub fn set_loadavg(&self, content: &str) {
        fs::write(self.proc_root().join("loadavg"), content).unwrap();
    }

    pub fn set_meminfo(&self, content: &str) {
        fs::write(self.proc_root().join("meminfo"), content).unwrap();
    }

    pub fn set_ac(&self, name: &str, online: &str) {
        let dir = self.power_supply().join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("online"), online).unwrap();
    }

    /// `unit` is "energy" or "charge".
    pub fn add_battery(&self, name: &str, unit: &str, full: &str, now: &str) {
        let dir = self.power_supply().join(name);
        fs::create_dir_all(&dir).unwrap();
        write_value(&dir, &format!("{unit}_full"), full);
        write_value(&dir, &format!("{unit}_now"), now);
    }

    /// Config pointing every source at this tree.
    pub fn config(&self, interfaces: &[&str]) -> AppConfig {
        let names = interfaces
            .iter()
            .map(|n| format!("{n:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        AppConfig::load_from_str(&format!(
            r#"
[network]
interfaces = [{names}]

[sources]
proc_root = {:?}
power_supply = {:?}

[display]
time_format = "%H:%M:%S"
"#,
            self.proc_root().to_str().unwrap(),
            self.power_supply().to_str().unwrap(),
        ))
        .unwrap()
    }
}

fn write_value(dir: &Path, file: &str, value: &str) {
    fs::write(dir.join(file), format!("{value}\n")).unwrap();
}
