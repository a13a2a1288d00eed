mod helper;
mod login;
mod notes;
