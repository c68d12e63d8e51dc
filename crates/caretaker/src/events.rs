use rota::CandidateName;
use rota::ipc::Command;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Show,
    Hide,
    Spin,
    SetCandidates(Vec<CandidateName>),
    ConfigReload,
}

impl From<Command> for AppEvent {
    fn from(command: Command) -> Self {
        match command {
            Command::Spin => AppEvent::Spin,
            Command::Reload => AppEvent::ConfigReload,
            Command::Show => AppEvent::Show,
            Command::Hide => AppEvent::Hide,
            Command::Names(names) => AppEvent::SetCandidates(names),
        }
    }
}
