mod login;
mod me;
mod refresh;
