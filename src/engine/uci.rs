use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, trace, warn};

use crate::engine::{AnalysisLine, EngineClient};
use crate::errors::BotError;
use crate::score::Score;

/// Extra wait beyond the requested movetime before a query is declared dead.
const MOVETIME_GRACE: Duration = Duration::from_millis(2_000);
/// Handshake / readiness wait.
const HANDSHAKE_TIMEOUT: Duration = Duration::from_millis(5_000);

/// `EngineClient` backed by a spawned UCI engine process (Stockfish or
/// compatible) over its line-based text protocol.
///
/// All reads go through a dedicated reader thread feeding a channel, so a
/// hung or crashed process surfaces as `EngineUnavailable` after the deadline
/// instead of blocking the caller forever.
pub struct UciEngine {
    child: Child,
    stdin: ChildStdin,
    lines: Receiver<String>,
    multipv: u32,
}

impl UciEngine {
    /// Spawn the engine binary and run the `uci`/`uciok` handshake.
    pub fn spawn(path: &str) -> Result<Self, BotError> {
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| BotError::EngineUnavailable(format!("failed to start {}: {}", path, e)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| BotError::EngineUnavailable("no stdin pipe".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| BotError::EngineUnavailable("no stdout pipe".to_string()))?;

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let reader = BufReader::new(stdout);
            for line in reader.lines() {
                match line {
                    Ok(l) => {
                        if tx.send(l).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        });

        let mut engine = Self { child, stdin, lines: rx, multipv: 0 };
        engine.send("uci")?;
        engine.wait_for("uciok", HANDSHAKE_TIMEOUT)?;
        engine.send("setoption name Ponder value false")?;
        engine.sync()?;
        debug!("engine ready: {}", path);
        Ok(engine)
    }

    fn send(&mut self, cmd: &str) -> Result<(), BotError> {
        trace!("engine << {}", cmd);
        writeln!(self.stdin, "{}", cmd)
            .and_then(|_| self.stdin.flush())
            .map_err(|e| BotError::EngineUnavailable(format!("write failed: {}", e)))
    }

    fn recv(&mut self, deadline: Instant) -> Result<String, BotError> {
        let now = Instant::now();
        if now >= deadline {
            return Err(BotError::EngineUnavailable("engine response timed out".to_string()));
        }
        let line = self
            .lines
            .recv_timeout(deadline - now)
            .map_err(|_| BotError::EngineUnavailable("engine response timed out".to_string()))?;
        trace!("engine >> {}", line);
        Ok(line)
    }

    fn wait_for(&mut self, token: &str, timeout: Duration) -> Result<(), BotError> {
        let deadline = Instant::now() + timeout;
        loop {
            let line = self.recv(deadline)?;
            if line.trim() == token {
                return Ok(());
            }
        }
    }

    /// `isready`/`readyok` barrier.
    fn sync(&mut self) -> Result<(), BotError> {
        self.send("isready")?;
        self.wait_for("readyok", HANDSHAKE_TIMEOUT)
    }

    fn set_multipv(&mut self, line_count: u32) -> Result<(), BotError> {
        let want = line_count.max(1);
        if self.multipv != want {
            self.send(&format!("setoption name MultiPV value {}", want))?;
            self.multipv = want;
        }
        Ok(())
    }

    /// Drain `info` records until `bestmove`, keeping the deepest record per
    /// multipv slot; slots are 1-based, best first.
    fn collect_lines(&mut self, deadline: Instant) -> Result<Vec<AnalysisLine>, BotError> {
        let mut slots: std::collections::BTreeMap<u32, AnalysisLine> = Default::default();
        loop {
            let line = self.recv(deadline)?;
            if let Some((slot, parsed)) = parse_info_line(&line) {
                match slots.get(&slot) {
                    Some(prev) if prev.depth > parsed.depth => {}
                    _ => {
                        slots.insert(slot, parsed);
                    }
                }
                continue;
            }
            if line.starts_with("bestmove") {
                return Ok(slots.into_values().collect());
            }
        }
    }
}

impl EngineClient for UciEngine {
    fn query(
        &mut self,
        fen: &str,
        movetime: Duration,
        line_count: u32,
    ) -> Result<Vec<AnalysisLine>, BotError> {
        self.set_multipv(line_count)?;
        // The engine keeps per-game search history; each query starts a fresh
        // logical game before the position is set.
        self.send("ucinewgame")?;
        self.sync()?;
        self.send(&format!("position fen {}", fen))?;
        self.send(&format!("go movetime {}", movetime.as_millis()))?;

        let deadline = Instant::now() + movetime + MOVETIME_GRACE;
        match self.collect_lines(deadline) {
            Ok(lines) => Ok(lines),
            Err(e) => {
                // The engine may still be searching; tell it to stop so a
                // retried query on the next event starts from a clean slate.
                let _ = self.send("stop");
                Err(e)
            }
        }
    }

    fn new_game(&mut self) -> Result<(), BotError> {
        self.send("ucinewgame")?;
        self.sync()
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        let _ = self.send("quit");
        thread::sleep(Duration::from_millis(50));
        if let Err(e) = self.child.kill() {
            trace!("engine kill: {}", e);
        }
        if let Err(e) = self.child.wait() {
            warn!("engine did not exit cleanly: {}", e);
        }
    }
}

/// Parse one `info … multipv … depth … score cp|mate … pv …` record.
///
/// Returns the 1-based multipv slot (1 when the engine omits it) and the
/// line's first pv move with depth and score. Records without a score or a pv
/// move (currmove chatter, nps-only updates) yield `None`.
pub fn parse_info_line(line: &str) -> Option<(u32, AnalysisLine)> {
    let line = line.trim();
    if !line.starts_with("info") {
        return None;
    }
    let mut multipv = 1u32;
    let mut depth: Option<u32> = None;
    let mut score: Option<Score> = None;
    let mut mv: Option<String> = None;

    let mut tokens = line.split_whitespace();
    while let Some(tok) = tokens.next() {
        match tok {
            "multipv" => {
                if let Some(v) = tokens.next().and_then(|s| s.parse().ok()) {
                    multipv = v;
                }
            }
            "depth" => {
                depth = tokens.next().and_then(|s| s.parse().ok());
            }
            "score" => match tokens.next() {
                Some("cp") => {
                    score = tokens.next().and_then(|s| s.parse().ok()).map(Score::Cp);
                }
                Some("mate") => {
                    score = tokens.next().and_then(|s| s.parse().ok()).map(Score::MateIn);
                }
                _ => {}
            },
            "pv" => {
                mv = tokens.next().map(str::to_string);
                break;
            }
            _ => {}
        }
    }

    match (depth, score, mv) {
        (Some(depth), Some(score), Some(mv)) => Some((multipv, AnalysisLine { mv, depth, score })),
        _ => None,
    }
}
