pub mod scorer;