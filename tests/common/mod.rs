//! Shared fixtures: an in-memory Splunk stand-in, scripted answers and a temp SPLUNK_HOME.

#![allow(dead_code)]

use anyhow::{Result, bail};
use splidx::engine::{ToolOutput, ToolRunner};
use splidx::utils::{Configuration, Interaction};
use splidx::{Session, Settings};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub const USER: &str = "admin";
pub const PASSWORD: &str = "changeme";

#[derive(Default)]
pub struct FakeState {
    pub indexes: Vec<String>,
    pub calls: Vec<Vec<String>>,
    /// Password `login` accepts.
    pub password: String,
    /// Fail every launch, as if the binary were not executable.
    pub unlaunchable: bool,
}

/// Answers `login`, `add index`, `list index` and `remove index` the way Splunk words them.
#[derive(Clone)]
pub struct FakeSplunk {
    pub state: Rc<RefCell<FakeState>>,
}

impl FakeSplunk {
    pub fn new(indexes: &[&str]) -> Self {
        let state = FakeState {
            indexes: indexes.iter().map(|s| s.to_string()).collect(),
            password: PASSWORD.to_string(),
            ..Default::default()
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn indexes(&self) -> Vec<String> {
        self.state.borrow().indexes.clone()
    }

    pub fn has_index(&self, name: &str) -> bool {
        self.state.borrow().indexes.iter().any(|i| i == name)
    }

    /// Calls whose first argument is `verb`.
    pub fn calls_to(&self, verb: &str) -> Vec<Vec<String>> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| c.first().map(String::as_str) == Some(verb))
            .cloned()
            .collect()
    }
}

fn out(stdout: &str, stderr: &str) -> ToolOutput {
    ToolOutput {
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
        status: Some(if stderr.is_empty() { 0 } else { 1 }),
    }
}

impl ToolRunner for FakeSplunk {
    fn run(&self, _binary: &Path, args: &[String]) -> Result<ToolOutput> {
        let mut state = self.state.borrow_mut();
        state.calls.push(args.to_vec());
        if state.unlaunchable {
            bail!("launch failed: permission denied");
        }
        let auth_ok = args
            .iter()
            .position(|a| a == "-auth")
            .and_then(|i| args.get(i + 1))
            .is_some_and(|a| *a == format!("{USER}:{}", state.password));
        let warning = "WARNING: Server Certificate Hostname Validation is disabled. Please see server.conf/[sslConfig]/cliVerifyServerName for details.\n";

        let verb: Vec<&str> = args.iter().take(3).map(String::as_str).collect();
        let reply = match verb.as_slice() {
            ["login", ..] if auth_ok => out("", ""),
            ["login", ..] => out("", "Login failed\n"),
            _ if !auth_ok => out("", "Login failed\n"),
            ["add", "index", name] => {
                let name = name.to_string();
                if state.indexes.contains(&name) {
                    out(warning, &format!("In handler 'indexes': An index with this name already exists: {name}\n"))
                } else {
                    state.indexes.push(name.clone());
                    out(&format!("{warning}Index \"{name}\" added.\n"), "")
                }
            }
            ["list", "index", ..] => {
                let mut text = warning.to_string();
                for name in &state.indexes {
                    text.push_str(&format!(
                        "{name}\n\t/opt/splunk/var/lib/splunk/{name}/db\n\t/opt/splunk/var/lib/splunk/{name}/colddb\n\t/opt/splunk/var/lib/splunk/{name}/thaweddb\n"
                    ));
                }
                out(&text, "")
            }
            ["remove", "index", name] => {
                let name = name.to_string();
                if let Some(pos) = state.indexes.iter().position(|i| *i == name) {
                    state.indexes.remove(pos);
                    out(&format!("Index \"{name}\" removed.\n"), "")
                } else {
                    out("", &format!("Error: Index \"{name}\" does not exist.\n"))
                }
            }
            _ => out("", "Error: unknown command\n"),
        };
        Ok(reply)
    }
}

/// Pops pre-recorded answers; lines and secrets share one queue.
#[derive(Default)]
pub struct ScriptedInteraction {
    pub answers: VecDeque<String>,
    pub prompts: Vec<String>,
}

impl ScriptedInteraction {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|s| s.to_string()).collect(),
            prompts: Vec::new(),
        }
    }

    fn next(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        match self.answers.pop_front() {
            Some(a) => Ok(a),
            None => bail!("end of input"),
        }
    }
}

impl Interaction for ScriptedInteraction {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }

    fn read_secret(&mut self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }
}

/// `<tmp>/bin/splunk`, `<tmp>/var/lib/splunk` and `<tmp>/etc/system/local/indexes.conf`.
pub struct SplunkHome {
    pub root: PathBuf,
}

impl SplunkHome {
    pub fn create(root: &Path) -> Self {
        fs::create_dir_all(root.join("bin")).unwrap();
        fs::write(root.join("bin").join("splunk"), "#!/bin/sh\n").unwrap();
        fs::create_dir_all(root.join("var/lib/splunk")).unwrap();
        fs::create_dir_all(root.join("etc/system/local")).unwrap();
        fs::write(
            root.join("etc/system/local/indexes.conf"),
            "[default]\nfrozenTimePeriodInSecs = 188697600\n",
        )
        .unwrap();
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn binary(&self) -> PathBuf {
        self.root.join("bin").join("splunk")
    }

    pub fn data_root(&self) -> PathBuf {
        self.root.join("var/lib/splunk")
    }

    pub fn conf(&self) -> PathBuf {
        self.root.join("etc/system/local/indexes.conf")
    }

    pub fn config(&self) -> Configuration {
        Configuration {
            splunk_path: self.binary().display().to_string(),
            username: USER.to_string(),
            password: PASSWORD.to_string(),
        }
    }

    pub fn session(&self, fake: &FakeSplunk) -> Session {
        Session::new(self.config(), Settings::default(), Box::new(fake.clone()))
    }
}

/// Write `bytes` at `root/rel`, creating parents.
pub fn write_file(root: &Path, rel: &str, bytes: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, bytes).unwrap();
}

/// The single `*.zip` in `dir`.
pub fn only_archive(dir: &Path) -> PathBuf {
    let zips: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|x| x == "zip"))
        .collect();
    assert_eq!(zips.len(), 1, "expected one archive in {}", dir.display());
    zips[0].clone()
}
