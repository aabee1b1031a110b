pub mod args;
pub mod op;
pub mod ops;

pub use ops::{
    Connect, Create, Delete, Edit, Explore, Init, List, Networks, Price, Switch, Tip, Verify,
    Version, View,
};
