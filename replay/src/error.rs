use faintlog_protocol::Nickname;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// A nickname scored or fainted but was never switched in
    #[error("Unresolved nickname: {0} never appeared in a switch line")]
    UnresolvedNickname(Nickname),
}
