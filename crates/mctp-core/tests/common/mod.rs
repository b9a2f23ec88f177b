pub mod mctp_server;
