use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::Result;

use opent::commands::Cmd;
use opent::messages::{AppMsg, DocumentMsg, Msg};
use opent::model::AppModel;
use opent::update::update;

use super::dialogs::Dialogs;
use super::input::{parse_line, Input};

pub struct App<D: Dialogs> {
    model: AppModel,
    dialogs: D,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    needs_redraw: bool,
    quit: bool,
}

impl<D: Dialogs> App<D> {
    pub fn new(model: AppModel, dialogs: D) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model,
            dialogs,
            msg_tx,
            msg_rx,
            needs_redraw: true,
            quit: false,
        }
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Feed a message and everything it leads to (dialog answers) through
    /// `update` until the queue is empty
    pub fn dispatch(&mut self, msg: Msg) {
        let _ = self.msg_tx.send(msg);
        self.process_messages();
    }

    fn process_messages(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            if let Some(cmd) = update(&mut self.model, msg) {
                if cmd.needs_redraw() {
                    self.needs_redraw = true;
                }
                self.process_cmd(cmd);
            }
            if self.quit {
                break;
            }
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => {}
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }

            // =====================================================================
            // Dialogs - answers go back through the message queue
            // =====================================================================
            Cmd::ShowOpenFileDialog { start_dir } => {
                let paths = self.dialogs.pick_files(start_dir.as_deref());
                let _ = self
                    .msg_tx
                    .send(Msg::App(AppMsg::OpenFileDialogResult { paths }));
            }

            Cmd::ShowSaveFileDialog { suggested_path } => {
                let path = self.dialogs.pick_save_path(suggested_path.as_deref());
                let _ = self
                    .msg_tx
                    .send(Msg::App(AppMsg::SaveFileAsDialogResult { path }));
            }

            Cmd::ShowConfirm { title, message } => {
                let choice = self.dialogs.confirm(&title, &message);
                tracing::debug!("Confirm {:?} answered {:?}", title, choice);
                let _ = self.msg_tx.send(Msg::confirm(choice));
            }

            Cmd::ShowNotice { level, message } => {
                tracing::info!("Notice ({:?}): {}", level, message);
                self.dialogs.notice(level, &message);
            }

            Cmd::Quit => {
                tracing::info!("Exiting");
                self.quit = true;
            }
        }
    }

    /// Handle one parsed input line
    fn handle_input<W: Write>(&mut self, input: Input, out: &mut W) -> Result<()> {
        match input {
            Input::Nothing => {}
            Input::Msg(msg) => self.dispatch(msg),
            Input::Paste => {
                if self.model.active_document().is_none() {
                    return Ok(());
                }
                if let Some(text) = self.dialogs.clipboard_text() {
                    self.dispatch(Msg::Document(DocumentMsg::Paste(text)));
                }
            }
            Input::Show => match self.model.active_document() {
                Some(doc) => writeln!(out, "{}", doc.text())?,
                None => writeln!(out, "(no document)")?,
            },
        }
        Ok(())
    }

    /// Render the tab bar and status line if anything changed
    fn render<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if !self.needs_redraw {
            return Ok(());
        }
        self.needs_redraw = false;
        writeln!(out, "{}", tab_bar(&self.model))?;
        if !self.model.ui.status_message.is_empty() {
            writeln!(out, "-- {}", self.model.ui.status_message)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Drive the editor from line input until exit or end of input.
    ///
    /// End of input asks to exit like the window close button.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        self.render(out)?;
        for line in input.lines() {
            let line = line?;
            match parse_line(&line) {
                Ok(parsed) => self.handle_input(parsed, out)?,
                Err(e) => writeln!(out, "? {}", e)?,
            }
            if self.quit {
                return Ok(());
            }
            self.render(out)?;
        }

        self.dispatch(Msg::App(AppMsg::RequestExit));
        Ok(())
    }
}

/// One-line tab bar: titles in order, the active one in brackets
fn tab_bar(model: &AppModel) -> String {
    if model.tabs.is_empty() {
        return model.window_title();
    }
    let active = model.tabs.active_index();
    let titles: Vec<String> = model
        .tabs
        .tabs()
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            if Some(i) == active {
                format!("[{}]", tab.title)
            } else {
                format!(" {} ", tab.title)
            }
        })
        .collect();
    format!("{} | {}", model.window_title(), titles.join(""))
}
