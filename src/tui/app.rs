//! Picker state machine and the background batch worker

use std::{
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, TryRecvError},
        Arc,
    },
    thread::{self, JoinHandle},
};

use crossterm::event::KeyCode;
use tracing::{info, warn};

use super::explorer::Explorer;
use crate::{
    config::StripConfig,
    error::Result,
    pipeline::{BatchSummary, Pipeline},
    progress::{BatchStage, ProgressUpdate},
};

/// Log lines kept for the scrolling view
const MAX_LOG_LINES: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Running,
    Finished,
}

/// Messages sent from the worker thread to the front end
#[derive(Debug)]
pub enum WorkerMessage {
    Progress(ProgressUpdate),
    Finished(std::result::Result<BatchSummary, String>),
}

pub struct App {
    config: StripConfig,
    pub explorer: Explorer,
    mode: Mode,
    logs: Vec<String>,
    stage: Option<BatchStage>,
    completed: usize,
    total: usize,
    output_root: Option<PathBuf>,
    cancel: Arc<AtomicBool>,
    receiver: Option<Receiver<WorkerMessage>>,
    worker: Option<JoinHandle<()>>,
    quit: bool,
}

impl App {
    pub fn new(config: StripConfig, start: &Path) -> Result<Self> {
        let mut app = Self {
            config,
            explorer: Explorer::new(start)?,
            mode: Mode::Browse,
            logs: Vec::new(),
            stage: None,
            completed: 0,
            total: 0,
            output_root: None,
            cancel: Arc::new(AtomicBool::new(false)),
            receiver: None,
            worker: None,
            quit: false,
        };
        app.update_output_root();
        Ok(app)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn copy_non_pdf(&self) -> bool {
        self.config.copy_non_pdf
    }

    pub fn output_root(&self) -> Option<&Path> {
        self.output_root.as_deref()
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn stage(&self) -> Option<BatchStage> {
        self.stage
    }

    pub fn counts(&self) -> (usize, usize) {
        (self.completed, self.total)
    }

    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            if self.mode == Mode::Finished { 1.0 } else { 0.0 }
        } else {
            (self.completed as f64 / self.total as f64).min(1.0)
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match self.mode {
            Mode::Browse => self.handle_browse_key(code),
            Mode::Running => match code {
                KeyCode::Esc | KeyCode::Char('x') => self.request_cancel(),
                KeyCode::Char('q') => {
                    self.request_cancel();
                    self.quit = true;
                }
                _ => {}
            },
            Mode::Finished => match code {
                KeyCode::Char('q') => self.quit = true,
                KeyCode::Enter | KeyCode::Esc => {
                    self.mode = Mode::Browse;
                    self.explorer.refresh();
                    self.update_output_root();
                }
                _ => {}
            },
        }
    }

    fn handle_browse_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.explorer.previous(),
            KeyCode::Down | KeyCode::Char('j') => self.explorer.next(),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
                self.explorer.enter();
                self.update_output_root();
            }
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
                self.explorer.parent();
                self.update_output_root();
            }
            KeyCode::Char('c') => {
                self.config.copy_non_pdf = !self.config.copy_non_pdf;
            }
            KeyCode::Char('s') => self.start(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    fn update_output_root(&mut self) {
        let pipeline = Pipeline::new(self.config.clone());
        self.output_root = pipeline.output_root_for(self.explorer.current()).ok();
    }

    /// Run the batch for the current folder on a worker thread
    pub fn start(&mut self) {
        let input = self.explorer.current().to_path_buf();
        let pipeline = Pipeline::new(self.config.clone());
        let output_root = match pipeline.output_root_for(&input) {
            Ok(root) => root,
            Err(e) => {
                self.push_log(format!("Cannot start: {}", e));
                return;
            }
        };

        self.logs.clear();
        self.push_log(format!("Input:  {}", input.display()));
        self.push_log(format!("Output: {}", output_root.display()));
        self.output_root = Some(output_root);
        self.stage = Some(BatchStage::Scanning);
        self.completed = 0;
        self.total = 0;

        self.cancel = Arc::new(AtomicBool::new(false));
        let pipeline = pipeline.with_cancel_flag(Arc::clone(&self.cancel));
        let (sender, receiver) = mpsc::channel();

        info!("Starting batch for {}", input.display());
        self.worker = Some(thread::spawn(move || {
            let progress = sender.clone();
            let result = pipeline.execute(&input, |update| {
                let _ = progress.send(WorkerMessage::Progress(update));
            });
            let _ = sender.send(WorkerMessage::Finished(result.map_err(|e| e.to_string())));
        }));
        self.receiver = Some(receiver);
        self.mode = Mode::Running;
    }

    pub fn request_cancel(&mut self) {
        if self.mode == Mode::Running && !self.cancel.swap(true, Ordering::Relaxed) {
            self.push_log("Cancelling after the current file...".into());
        }
    }

    /// Apply every message the worker has sent so far
    pub fn poll_worker(&mut self) {
        let Some(receiver) = self.receiver.take() else {
            return;
        };
        loop {
            match receiver.try_recv() {
                Ok(message) => self.apply(message),
                Err(TryRecvError::Empty) => {
                    self.receiver = Some(receiver);
                    return;
                }
                Err(TryRecvError::Disconnected) => {
                    if self.mode == Mode::Running {
                        self.apply(WorkerMessage::Finished(Err("worker stopped unexpectedly".into())));
                    }
                    self.join_worker();
                    return;
                }
            }
        }
    }

    pub fn apply(&mut self, message: WorkerMessage) {
        match message {
            WorkerMessage::Progress(update) => {
                self.stage = Some(update.stage);
                self.completed = update.completed;
                self.total = update.total;
                if let Some(record) = update.record {
                    let line = format!("[{}/{}] {}", update.completed, update.total, record);
                    self.push_log(line);
                }
            }
            WorkerMessage::Finished(Ok(summary)) => {
                for line in summary.to_string().lines() {
                    self.push_log(line.to_string());
                }
                self.stage = Some(BatchStage::Complete);
                self.mode = Mode::Finished;
            }
            WorkerMessage::Finished(Err(reason)) => {
                warn!("Batch failed: {}", reason);
                self.push_log(format!("Error: {}", reason));
                self.mode = Mode::Finished;
            }
        }
    }

    /// Stop a running batch and wait for the worker
    pub fn shutdown(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
        self.receiver = None;
        self.join_worker();
    }

    fn join_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Worker thread panicked");
            }
        }
    }

    fn push_log(&mut self, line: String) {
        self.logs.push(line);
        if self.logs.len() > MAX_LOG_LINES {
            let excess = self.logs.len() - MAX_LOG_LINES;
            self.logs.drain(..excess);
        }
    }
}
